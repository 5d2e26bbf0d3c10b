use super::ids::ResidueId;
use std::fmt;

/// Identifies a residue by the fields a HELIX, SHEET or LINK record names it by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueSpecifier {
    pub residue_name: String,
    pub chain_id: char,
    pub sequence_number: isize,
    pub insertion_code: Option<char>,
}

impl ResidueSpecifier {
    pub fn new(
        residue_name: &str,
        chain_id: char,
        sequence_number: isize,
        insertion_code: Option<char>,
    ) -> Self {
        Self {
            residue_name: residue_name.to_string(),
            chain_id,
            sequence_number,
            insertion_code,
        }
    }

    /// The lookup key used against the assembled hierarchy.
    pub fn key(&self) -> (char, isize, Option<char>) {
        (self.chain_id, self.sequence_number, self.insertion_code)
    }
}

impl fmt::Display for ResidueSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}",
            self.residue_name, self.chain_id, self.sequence_number
        )?;
        if let Some(icode) = self.insertion_code {
            write!(f, "{icode}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryStructureKind {
    Helix {
        /// Helix class (1 = right-handed alpha, 5 = 3-10, ...).
        class: Option<u8>,
    },
    Sheet {
        strand: isize,
        num_strands: Option<usize>,
        /// 0 for the first strand, 1 parallel, -1 anti-parallel.
        sense: Option<i8>,
    },
}

/// Resolution state of an annotation range. `Resolved` and `Empty` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Unresolved,
    Resolved {
        start: ResidueId,
        end: ResidueId,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryStructure {
    pub kind: SecondaryStructureKind,
    pub identifier: String,
    pub serial: Option<isize>,
    pub length: Option<usize>,
    pub start: ResidueSpecifier,
    pub end: ResidueSpecifier,
    resolution: Resolution,
}

impl SecondaryStructure {
    pub fn new(
        kind: SecondaryStructureKind,
        identifier: &str,
        start: ResidueSpecifier,
        end: ResidueSpecifier,
    ) -> Self {
        Self {
            kind,
            identifier: identifier.to_string(),
            serial: None,
            length: None,
            start,
            end,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_helix(&self) -> bool {
        matches!(self.kind, SecondaryStructureKind::Helix { .. })
    }

    pub fn is_sheet(&self) -> bool {
        matches!(self.kind, SecondaryStructureKind::Sheet { .. })
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    pub fn is_empty(&self) -> bool {
        self.resolution == Resolution::Empty
    }

    /// Attaches residue references. Returns `false` if already terminal.
    pub(crate) fn resolve(&mut self, start: ResidueId, end: ResidueId) -> bool {
        self.transition(Resolution::Resolved { start, end })
    }

    /// Marks the range as an inert placeholder. Returns `false` if already terminal.
    pub(crate) fn mark_empty(&mut self) -> bool {
        self.transition(Resolution::Empty)
    }

    fn transition(&mut self, next: Resolution) -> bool {
        if self.resolution != Resolution::Unresolved {
            return false;
        }
        self.resolution = next;
        true
    }
}
