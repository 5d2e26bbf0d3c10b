use super::ids::ResidueId;
use super::topology::Bond;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainType {
    Protein,
    DNA,
    RNA,
    #[default]
    Other,
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChainType::Protein => "Protein",
                ChainType::DNA => "DNA",
                ChainType::RNA => "RNA",
                ChainType::Other => "Other",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,                          // Chain identifier (e.g., 'A', 'B')
    pub chain_type: ChainType,             // Type of the chain, inferred from its residues
    pub(crate) residues: Vec<ResidueId>,   // Ordered list of residue IDs belonging to this chain
    pub(crate) backbone_bonds: Vec<Bond>,  // Bonds between consecutive N/CA/C atoms
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            chain_type: ChainType::Other,
            residues: Vec::new(),
            backbone_bonds: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn backbone_bonds(&self) -> &[Bond] {
        &self.backbone_bonds
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }
}
