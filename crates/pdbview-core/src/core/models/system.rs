use super::annotation::ChainSequence;
use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use super::secondary::{Resolution, SecondaryStructure};
use super::topology::{Bond, BondKind};
use slotmap::SlotMap;
use std::collections::HashMap;
use std::fmt;

type ResidueKey = (char, isize, Option<char>);

/// The root of a loaded structure.
///
/// Atoms, residues and chains live in slot maps; file order is kept in the
/// chains' residue lists and the residues' atom lists. A `Model` is built once
/// by the load workflow and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Primary storage for atoms, both chain atoms and heteroatoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in first-appearance order.
    chain_order: Vec<ChainId>,
    /// HETATM atoms in file order; they belong to no residue.
    heteroatoms: Vec<AtomId>,
    secondary_structures: Vec<SecondaryStructure>,
    /// Bonds declared by CONECT and LINK records.
    explicit_bonds: Vec<Bond>,
    sequences: Vec<ChainSequence>,
    metadata: String,
    model_count: usize,
    /// First chain registered under each identifier.
    chain_id_map: HashMap<char, ChainId>,
    /// First residue registered under each (chain, sequence number, insertion code).
    residue_id_map: HashMap<ResidueKey, ResidueId>,
    /// Serial number index over the atoms eligible for CONECT resolution.
    serial_map: HashMap<usize, AtomId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Iterates chains in the order they first appear in the input.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns the first chain carrying the given identifier.
    pub fn chain_by_id(&self, id: char) -> Option<&Chain> {
        self.find_chain_by_id(id).and_then(|cid| self.chains.get(cid))
    }

    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue by chain identifier, sequence number and insertion code.
    pub fn find_residue(
        &self,
        chain_id: char,
        sequence_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, sequence_number, insertion_code))
            .copied()
    }

    /// Iterates the residues of a chain in file order.
    pub fn chain_residues(&self, chain_id: ChainId) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains
            .get(chain_id)
            .map(|chain| chain.residues())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    /// Iterates the atoms of a residue in file order.
    pub fn atoms_in_residue(&self, residue_id: ResidueId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.residues
            .get(residue_id)
            .map(|residue| residue.atoms())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    pub fn atom_by_serial(&self, serial: usize) -> Option<&Atom> {
        self.find_atom_by_serial(serial)
            .and_then(|id| self.atoms.get(id))
    }

    pub fn find_atom_by_serial(&self, serial: usize) -> Option<AtomId> {
        self.serial_map.get(&serial).copied()
    }

    /// Iterates heteroatoms in file order.
    pub fn heteroatoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.heteroatoms
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    pub fn heteroatom_ids(&self) -> &[AtomId] {
        &self.heteroatoms
    }

    pub fn secondary_structures(&self) -> &[SecondaryStructure] {
        &self.secondary_structures
    }

    pub fn helices(&self) -> impl Iterator<Item = &SecondaryStructure> {
        self.secondary_structures.iter().filter(|s| s.is_helix())
    }

    pub fn sheets(&self) -> impl Iterator<Item = &SecondaryStructure> {
        self.secondary_structures.iter().filter(|s| s.is_sheet())
    }

    pub fn explicit_bonds(&self) -> &[Bond] {
        &self.explicit_bonds
    }

    pub fn sequences(&self) -> &[ChainSequence] {
        &self.sequences
    }

    /// Header, title and remark text, each line terminated by a newline.
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// Number of coordinate models seen in the input.
    pub fn model_count(&self) -> usize {
        self.model_count
    }

    /// Resolves both ends of a bond. Returns `None` for a dangling bond.
    pub fn bond_atoms(&self, bond: &Bond) -> Option<(&Atom, &Atom)> {
        Some((self.atoms.get(bond.atom1_id)?, self.atoms.get(bond.atom2_id)?))
    }

    /// Returns the run of residues from `start` to `end` inclusive, or `None`
    /// when they lie in different chains or `end` precedes `start`.
    pub fn residues_between(&self, start: ResidueId, end: ResidueId) -> Option<&[ResidueId]> {
        let chain_id = self.residues.get(start)?.chain;
        if self.residues.get(end)?.chain != chain_id {
            return None;
        }
        let residues = self.chains.get(chain_id)?.residues();
        let s = residues.iter().position(|&id| id == start)?;
        let e = residues.iter().position(|&id| id == end)?;
        (s <= e).then(|| &residues[s..=e])
    }

    /// Lists the residues a resolved range spans within its chain.
    ///
    /// Unresolved and empty ranges span no residues.
    pub fn residues_in_range(&self, range: &SecondaryStructure) -> Vec<ResidueId> {
        match range.resolution() {
            Resolution::Resolved { start, end } => self
                .residues_between(start, end)
                .map(<[ResidueId]>::to_vec)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Iterates every bond in the model: intra-residue, backbone, then explicit.
    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.chains()
            .flat_map(move |(chain_id, chain)| {
                self.chain_residues(chain_id)
                    .flat_map(|(_, residue)| residue.bonds().iter())
                    .chain(chain.backbone_bonds().iter())
            })
            .chain(self.explicit_bonds.iter())
    }

    /// Total number of stored atoms, heteroatoms included.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn chain_atom_count(&self) -> usize {
        self.residues.values().map(|residue| residue.atom_count()).sum()
    }

    pub fn heteroatom_count(&self) -> usize {
        self.heteroatoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chain_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn summary(&self) -> ModelSummary {
        let mut summary = ModelSummary {
            chains: self.chain_count(),
            residues: self.residue_count(),
            atoms: self.chain_atom_count(),
            heteroatoms: self.heteroatom_count(),
            models: self.model_count,
            ..Default::default()
        };
        for bond in self.bonds() {
            match bond.kind {
                BondKind::IntraResidue => summary.intra_residue_bonds += 1,
                BondKind::Backbone => summary.backbone_bonds += 1,
                BondKind::ExplicitLink => summary.explicit_bonds += 1,
            }
        }
        for range in &self.secondary_structures {
            if range.is_helix() {
                summary.helices += 1;
            } else {
                summary.sheets += 1;
            }
            if range.is_empty() {
                summary.empty_ranges += 1;
            }
        }
        summary
    }

    // --- Construction, used by the load workflow ---

    /// Opens a new chain. Split chains reusing an identifier get separate
    /// entries; identifier lookups keep pointing at the first.
    pub(crate) fn add_chain(&mut self, id: char) -> ChainId {
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_order.push(chain_id);
        self.chain_id_map.entry(id).or_insert(chain_id);
        chain_id
    }

    pub(crate) fn add_residue(
        &mut self,
        chain_id: ChainId,
        sequence_number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let residue = Residue::new(sequence_number, insertion_code, name, chain.id, chain_id);
        let key = (chain.id, sequence_number, insertion_code);
        let residue_id = self.residues.insert(residue);
        chain.residues.push(residue_id);
        self.residue_id_map.entry(key).or_insert(residue_id);
        Some(residue_id)
    }

    /// Stores an atom as a member of a residue. Returns the new id together
    /// with the atom previously mapped under the same name, if any.
    pub(crate) fn add_atom_to_residue(
        &mut self,
        residue_id: ResidueId,
        atom: Atom,
    ) -> Option<(AtomId, Option<AtomId>)> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        let replaced = self.residues[residue_id].add_atom(&name, atom_id);
        Some((atom_id, replaced))
    }

    pub(crate) fn add_heteroatom(&mut self, atom: Atom) -> AtomId {
        let atom_id = self.atoms.insert(atom);
        self.heteroatoms.push(atom_id);
        atom_id
    }

    /// Indexes an atom by serial. Returns the atom previously indexed under it.
    pub(crate) fn index_serial(&mut self, serial: usize, atom_id: AtomId) -> Option<AtomId> {
        self.serial_map.insert(serial, atom_id)
    }

    pub(crate) fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    pub(crate) fn chain_mut(&mut self, id: ChainId) -> Option<&mut Chain> {
        self.chains.get_mut(id)
    }

    pub(crate) fn secondary_structures_mut(&mut self) -> &mut Vec<SecondaryStructure> {
        &mut self.secondary_structures
    }

    pub(crate) fn push_explicit_bond(&mut self, bond: Bond) {
        self.explicit_bonds.push(bond);
    }

    pub(crate) fn set_sequences(&mut self, sequences: Vec<ChainSequence>) {
        self.sequences = sequences;
    }

    pub(crate) fn set_metadata(&mut self, metadata: String) {
        self.metadata = metadata;
    }

    pub(crate) fn set_model_count(&mut self, count: usize) {
        self.model_count = count;
    }
}

/// Counts describing a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelSummary {
    pub chains: usize,
    pub residues: usize,
    pub atoms: usize,
    pub heteroatoms: usize,
    pub intra_residue_bonds: usize,
    pub backbone_bonds: usize,
    pub explicit_bonds: usize,
    pub helices: usize,
    pub sheets: usize,
    pub empty_ranges: usize,
    pub models: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chains:        {}", self.chains)?;
        writeln!(f, "Residues:      {}", self.residues)?;
        writeln!(f, "Atoms:         {}", self.atoms)?;
        writeln!(f, "Heteroatoms:   {}", self.heteroatoms)?;
        writeln!(
            f,
            "Bonds:         {} intra-residue, {} backbone, {} explicit",
            self.intra_residue_bonds, self.backbone_bonds, self.explicit_bonds
        )?;
        writeln!(
            f,
            "Secondary:     {} helices, {} sheets ({} unresolved)",
            self.helices, self.sheets, self.empty_ranges
        )?;
        write!(f, "Models seen:   {}", self.models)
    }
}
