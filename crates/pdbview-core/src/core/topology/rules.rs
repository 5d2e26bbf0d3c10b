use crate::core::models::residue::AminoAcidType;
use phf::{Map, phf_map};
use std::collections::HashSet;

/// A bond between two named atoms of one residue.
pub type AtomPair = (&'static str, &'static str);

const ALA: &[AtomPair] = &[("CB", "HB1"), ("CB", "HB2"), ("CB", "HB3")];

const ARG: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "CD"),
    ("CD", "HD2"), ("CD", "HD3"), ("CD", "NE"),
    ("NE", "HE"), ("NE", "CZ"),
    ("CZ", "NH1"), ("CZ", "NH2"),
    ("NH1", "HH11"), ("NH1", "HH12"),
    ("NH2", "HH21"), ("NH2", "HH22"),
];

const ASN: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "OD1"), ("CG", "ND2"),
    ("ND2", "HD21"), ("ND2", "HD22"),
];

const ASP: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "OD1"), ("CG", "OD2"),
    ("OD2", "HD2"),
];

const CYS: &[AtomPair] = &[("CB", "HB2"), ("CB", "HB3"), ("CB", "SG"), ("SG", "HG")];

const GLN: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "CD"),
    ("CD", "OE1"), ("CD", "NE2"),
    ("NE2", "HE21"), ("NE2", "HE22"),
];

const GLU: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "CD"),
    ("CD", "OE1"), ("CD", "OE2"),
    ("OE2", "HE2"),
];

const GLY: &[AtomPair] = &[("CA", "HA2"), ("CA", "HA3")];

const HIS: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "ND1"), ("CG", "CD2"),
    ("ND1", "HD1"), ("ND1", "CE1"),
    ("CD2", "HD2"), ("CD2", "NE2"),
    ("CE1", "HE1"), ("CE1", "NE2"),
    ("NE2", "HE2"),
];

const ILE: &[AtomPair] = &[
    ("CB", "HB"), ("CB", "CG1"), ("CB", "CG2"),
    ("CG1", "HG12"), ("CG1", "HG13"), ("CG1", "CD1"),
    ("CG2", "HG21"), ("CG2", "HG22"), ("CG2", "HG23"),
    ("CD1", "HD11"), ("CD1", "HD12"), ("CD1", "HD13"),
];

const LEU: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG"), ("CG", "CD1"), ("CG", "CD2"),
    ("CD1", "HD11"), ("CD1", "HD12"), ("CD1", "HD13"),
    ("CD2", "HD21"), ("CD2", "HD22"), ("CD2", "HD23"),
];

const LYS: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "CD"),
    ("CD", "HD2"), ("CD", "HD3"), ("CD", "CE"),
    ("CE", "HE2"), ("CE", "HE3"), ("CE", "NZ"),
    ("NZ", "HZ1"), ("NZ", "HZ2"), ("NZ", "HZ3"),
];

const MET: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "SD"),
    ("SD", "CE"),
    ("CE", "HE1"), ("CE", "HE2"), ("CE", "HE3"),
];

const PHE: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "CD1"), ("CG", "CD2"),
    ("CD1", "HD1"), ("CD1", "CE1"),
    ("CD2", "HD2"), ("CD2", "CE2"),
    ("CE1", "HE1"), ("CE1", "CZ"),
    ("CE2", "HE2"), ("CE2", "CZ"),
    ("CZ", "HZ"),
];

const PRO: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "HG2"), ("CG", "HG3"), ("CG", "CD"),
    ("CD", "HD2"), ("CD", "HD3"), ("CD", "N"),
];

const SER: &[AtomPair] = &[("CB", "HB2"), ("CB", "HB3"), ("CB", "OG"), ("OG", "HG")];

const THR: &[AtomPair] = &[
    ("CB", "HB"), ("CB", "OG1"), ("CB", "CG2"),
    ("OG1", "HG1"),
    ("CG2", "HG21"), ("CG2", "HG22"), ("CG2", "HG23"),
];

const TRP: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "CD1"), ("CG", "CD2"),
    ("CD1", "HD1"), ("CD1", "NE1"),
    ("NE1", "HE1"), ("NE1", "CE2"),
    ("CE2", "CD2"), ("CE2", "CZ2"),
    ("CZ2", "HZ2"), ("CZ2", "CH2"),
    ("CH2", "HH2"), ("CH2", "CZ3"),
    ("CZ3", "HZ3"), ("CZ3", "CE3"),
    ("CE3", "HE3"), ("CE3", "CD2"),
];

const TYR: &[AtomPair] = &[
    ("CB", "HB2"), ("CB", "HB3"), ("CB", "CG"),
    ("CG", "CD1"), ("CG", "CD2"),
    ("CD1", "HD1"), ("CD1", "CE1"),
    ("CD2", "HD2"), ("CD2", "CE2"),
    ("CE1", "HE1"), ("CE1", "CZ"),
    ("CE2", "HE2"), ("CE2", "CZ"),
    ("CZ", "OH"),
    ("OH", "HH"),
];

const VAL: &[AtomPair] = &[
    ("CB", "HB"), ("CB", "CG1"), ("CB", "CG2"),
    ("CG1", "HG11"), ("CG1", "HG12"), ("CG1", "HG13"),
    ("CG2", "HG21"), ("CG2", "HG22"), ("CG2", "HG23"),
];

static SIDE_CHAIN_RULES: Map<&'static str, &'static [AtomPair]> = phf_map! {
    "ALA" => ALA, "ARG" => ARG, "ASN" => ASN, "ASP" => ASP, "CYS" => CYS,
    "GLN" => GLN, "GLU" => GLU, "GLY" => GLY, "HIS" => HIS, "ILE" => ILE,
    "LEU" => LEU, "LYS" => LYS, "MET" => MET, "PHE" => PHE, "PRO" => PRO,
    "SER" => SER, "THR" => THR, "TRP" => TRP, "TYR" => TYR, "VAL" => VAL,
};

const CARBONYL: AtomPair = ("C", "O");
const TERMINAL_CARBOXYL: AtomPair = ("C", "OXT");
const ALPHA_HYDROGEN: AtomPair = ("CA", "HA");
const ALPHA_BETA: AtomPair = ("CA", "CB");
const AMIDE_HYDROGEN: AtomPair = ("N", "H");
const TERMINAL_AMINE: [AtomPair; 3] = [("N", "H1"), ("N", "H2"), ("N", "H3")];

/// Returns the side-chain rule table of a standard residue type.
pub fn side_chain_rules(residue_type: AminoAcidType) -> &'static [AtomPair] {
    SIDE_CHAIN_RULES
        .get(residue_type.three_letter_code())
        .copied()
        .unwrap_or_default()
}

/// Builds the intra-residue bond list of one residue.
///
/// Shared rules come first (carbonyl, alpha carbon, amide nitrogen), then the
/// given side-chain pairs, then the terminal carboxyl. `residue_type` is
/// `None` for residues outside the standard twenty, which only get the rules
/// that do not depend on a side chain. Pairs naming an absent atom are
/// skipped; the result is de-duplicated, keeping first occurrences.
pub fn intra_residue_bonds<'a>(
    residue_type: Option<AminoAcidType>,
    side_chain: impl IntoIterator<Item = (&'a str, &'a str)>,
    has_atom: impl Fn(&str) -> bool,
) -> Vec<(&'a str, &'a str)> {
    let mut candidates: Vec<(&'a str, &'a str)> = vec![CARBONYL];

    match residue_type {
        Some(AminoAcidType::Glycine) => {}
        Some(_) => candidates.extend([ALPHA_HYDROGEN, ALPHA_BETA]),
        None => candidates.push(ALPHA_HYDROGEN),
    }

    if residue_type != Some(AminoAcidType::Proline) {
        if has_atom("H") {
            candidates.push(AMIDE_HYDROGEN);
        } else {
            candidates.extend(TERMINAL_AMINE);
        }
    }

    candidates.extend(side_chain);
    candidates.push(TERMINAL_CARBOXYL);

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|&(a, b)| has_atom(a) && has_atom(b))
        .filter(|&(a, b)| seen.insert(if a <= b { (a, b) } else { (b, a) }))
        .collect()
}

/// Intra-residue bonds from the built-in tables alone.
pub fn standard_bonds(residue_name: &str, has_atom: impl Fn(&str) -> bool) -> Vec<AtomPair> {
    let residue_type = residue_name.parse::<AminoAcidType>().ok();
    let side_chain = residue_type.map(side_chain_rules).unwrap_or_default();
    intra_residue_bonds(residue_type, side_chain.iter().copied(), has_atom)
}
