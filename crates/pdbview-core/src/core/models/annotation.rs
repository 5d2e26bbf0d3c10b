use super::residue::AminoAcidType;
use super::secondary::ResidueSpecifier;
use std::fmt;

/// Names one atom the way a LINK record does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomSpecifier {
    pub atom_name: String,
    pub alt_loc: Option<char>,
    pub residue: ResidueSpecifier,
}

impl fmt::Display for AtomSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.residue, self.atom_name)
    }
}

/// An inter-atom bond declared by the file, before it is resolved against the
/// assembled hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplicitLink {
    /// One (serial, bonded serial) pair from a CONECT record.
    Connect { serial_a: usize, serial_b: usize },
    /// A LINK record naming both ends by residue and atom name.
    Link {
        first: AtomSpecifier,
        second: AtomSpecifier,
        distance: Option<f64>,
    },
}

impl fmt::Display for ExplicitLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplicitLink::Connect { serial_a, serial_b } => {
                write!(f, "CONECT {serial_a} -> {serial_b}")
            }
            ExplicitLink::Link { first, second, .. } => {
                write!(f, "LINK {first} -> {second}")
            }
        }
    }
}

/// The SEQRES residue names of one chain, in record order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainSequence {
    pub chain_id: char,
    pub declared_length: Option<usize>,
    pub residues: Vec<String>,
}

impl ChainSequence {
    pub fn new(chain_id: char) -> Self {
        Self {
            chain_id,
            declared_length: None,
            residues: Vec::new(),
        }
    }

    /// One-letter rendering, with `X` for residues outside the standard twenty.
    pub fn one_letter(&self) -> String {
        self.residues
            .iter()
            .map(|name| {
                name.parse::<AminoAcidType>()
                    .map_or('X', |t| t.one_letter_code())
            })
            .collect()
    }
}
