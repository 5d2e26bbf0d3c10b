use super::ids::{AtomId, ChainId};
use super::topology::Bond;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcidType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)
    Methionine, // Methionine (MET)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG)
    Lysine,    // Lysine (LYS)
    Histidine, // Histidine (HIS), any protonation state

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown amino acid code: '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl AminoAcidType {
    pub fn three_letter_code(&self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Glycine => "GLY",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Proline => "PRO",
            Self::Valine => "VAL",
            Self::Phenylalanine => "PHE",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Asparagine => "ASN",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Methionine => "MET",
            Self::Arginine => "ARG",
            Self::Lysine => "LYS",
            Self::Histidine => "HIS",
            Self::AsparticAcid => "ASP",
            Self::GlutamicAcid => "GLU",
        }
    }

    pub fn one_letter_code(&self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Glycine => 'G',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Proline => 'P',
            Self::Valine => 'V',
            Self::Phenylalanine => 'F',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Asparagine => 'N',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Methionine => 'M',
            Self::Arginine => 'R',
            Self::Lysine => 'K',
            Self::Histidine => 'H',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
        }
    }
}

impl FromStr for AminoAcidType {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALA" => Ok(Self::Alanine),
            "GLY" => Ok(Self::Glycine),
            "ILE" => Ok(Self::Isoleucine),
            "LEU" => Ok(Self::Leucine),
            "PRO" => Ok(Self::Proline),
            "VAL" => Ok(Self::Valine),
            "PHE" => Ok(Self::Phenylalanine),
            "TRP" => Ok(Self::Tryptophan),
            "TYR" => Ok(Self::Tyrosine),
            "ASN" => Ok(Self::Asparagine),
            "CYS" | "CYX" => Ok(Self::Cysteine),
            "GLN" => Ok(Self::Glutamine),
            "SER" => Ok(Self::Serine),
            "THR" => Ok(Self::Threonine),
            "MET" => Ok(Self::Methionine),
            "ARG" => Ok(Self::Arginine),
            "LYS" => Ok(Self::Lysine),
            "HIS" | "HID" | "HIE" | "HIP" | "HSD" | "HSE" | "HSP" => Ok(Self::Histidine),
            "ASP" => Ok(Self::AsparticAcid),
            "GLU" => Ok(Self::GlutamicAcid),
            other => Err(ParseAminoAcidError(other.to_string())),
        }
    }
}

impl fmt::Display for AminoAcidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_code())
    }
}

/// A contiguous run of atoms sharing one sequence number within a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub sequence_number: isize,             // Residue sequence number from source file
    pub insertion_code: Option<char>,       // Insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "HOH")
    pub residue_type: Option<AminoAcidType>, // Standard type, when the name is recognized
    pub chain_id: char,                     // Identifier of the parent chain
    pub chain: ChainId,                     // Stable ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Member atoms in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
    pub(crate) bonds: Vec<Bond>,            // Intra-residue bonds from the topology tables
}

impl Residue {
    pub(crate) fn new(
        sequence_number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: char,
        chain: ChainId,
    ) -> Self {
        Self {
            sequence_number,
            insertion_code,
            name: name.to_string(),
            residue_type: name.parse().ok(),
            chain_id,
            chain,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
            bonds: Vec::new(),
        }
    }

    /// Appends an atom and maps its name, returning the atom previously mapped
    /// under the same name. The previous atom stays a member of the residue.
    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) -> Option<AtomId> {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id)
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atom_name_map.contains_key(name)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// One-letter code for standard residues, `'X'` otherwise.
    pub fn one_letter_code(&self) -> char {
        self.residue_type.map_or('X', |t| t.one_letter_code())
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.name, self.chain_id, self.sequence_number)?;
        if let Some(icode) = self.insertion_code {
            write!(f, "{icode}")?;
        }
        Ok(())
    }
}
