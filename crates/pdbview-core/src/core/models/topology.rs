use super::ids::AtomId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Where a bond came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    /// Derived from the residue topology tables.
    IntraResidue,
    /// Between consecutive main-chain atoms within distance threshold.
    Backbone,
    /// Declared by a CONECT or LINK record.
    ExplicitLink,
}

#[derive(Debug, Error)]
#[error("Invalid bond kind string")]
pub struct ParseBondKindError;

impl FromStr for BondKind {
    type Err = ParseBondKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intra" | "intra-residue" | "residue" => Ok(Self::IntraResidue),
            "backbone" | "main-chain" => Ok(Self::Backbone),
            "link" | "explicit" | "explicit-link" => Ok(Self::ExplicitLink),
            _ => Err(ParseBondKindError),
        }
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::IntraResidue => "Intra-residue",
                Self::Backbone => "Backbone",
                Self::ExplicitLink => "Explicit link",
            }
        )
    }
}

/// An unordered pair of atoms. `Bond::new(a, b, k) == Bond::new(b, a, k)`.
#[derive(Debug, Clone, Copy)]
pub struct Bond {
    pub atom1_id: AtomId, // ID of the first atom
    pub atom2_id: AtomId, // ID of the second atom
    pub kind: BondKind,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, kind: BondKind) -> Self {
        Self {
            atom1_id,
            atom2_id,
            kind,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the atom on the other end, if `atom_id` is part of this bond.
    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }

    fn ordered(&self) -> (AtomId, AtomId) {
        if self.atom1_id <= self.atom2_id {
            (self.atom1_id, self.atom2_id)
        } else {
            (self.atom2_id, self.atom1_id)
        }
    }
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.ordered() == other.ordered()
    }
}

impl Eq for Bond {}

impl Hash for Bond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
        self.kind.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;
    use std::collections::HashSet;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_kind_from_str_parses_valid_strings() {
        assert_eq!("intra".parse::<BondKind>().unwrap(), BondKind::IntraResidue);
        assert_eq!("Backbone".parse::<BondKind>().unwrap(), BondKind::Backbone);
        assert_eq!("link".parse::<BondKind>().unwrap(), BondKind::ExplicitLink);
        assert!("double".parse::<BondKind>().is_err());
    }

    #[test]
    fn bond_kind_display_outputs_expected_strings() {
        assert_eq!(BondKind::IntraResidue.to_string(), "Intra-residue");
        assert_eq!(BondKind::Backbone.to_string(), "Backbone");
        assert_eq!(BondKind::ExplicitLink.to_string(), "Explicit link");
    }

    #[test]
    fn bond_equality_ignores_atom_order() {
        let a = dummy_atom_id(1);
        let b = dummy_atom_id(2);
        assert_eq!(
            Bond::new(a, b, BondKind::Backbone),
            Bond::new(b, a, BondKind::Backbone)
        );
        assert_ne!(
            Bond::new(a, b, BondKind::Backbone),
            Bond::new(a, b, BondKind::ExplicitLink)
        );
    }

    #[test]
    fn bond_hash_ignores_atom_order() {
        let a = dummy_atom_id(3);
        let b = dummy_atom_id(4);
        let mut set = HashSet::new();
        set.insert(Bond::new(a, b, BondKind::IntraResidue));
        set.insert(Bond::new(b, a, BondKind::IntraResidue));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn bond_contains_and_partner() {
        let a = dummy_atom_id(10);
        let b = dummy_atom_id(20);
        let unrelated = dummy_atom_id(30);
        let bond = Bond::new(a, b, BondKind::IntraResidue);
        assert!(bond.contains(a));
        assert!(bond.contains(b));
        assert!(!bond.contains(unrelated));
        assert_eq!(bond.partner(a), Some(b));
        assert_eq!(bond.partner(b), Some(a));
        assert_eq!(bond.partner(unrelated), None);
    }
}
