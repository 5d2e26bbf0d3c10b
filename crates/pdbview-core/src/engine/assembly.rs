use super::config::LoadConfig;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::progress::{Progress, ProgressReporter};
use crate::core::models::atom::Atom;
use crate::core::models::chain::ChainType;
use crate::core::models::ids::{AtomId, ChainId, ResidueId};
use crate::core::models::residue::Residue;
use crate::core::models::system::Model;
use crate::core::models::topology::{Bond, BondKind};
use crate::core::topology::registry::TopologyRegistry;
use crate::core::utils::identifiers::{is_dna_residue, is_main_chain_atom, is_rna_residue};
use nalgebra::Point3;
use tracing::debug;

type ResidueKey = (char, isize, Option<char>);

/// Groups atom records into residues and chains by adjacency.
///
/// A residue boundary falls wherever the chain identifier, sequence number or
/// insertion code differs from the previous atom; a chain boundary wherever
/// the chain identifier differs. Heteroatoms are stored flat on the model.
pub struct Assembler<'a> {
    registry: &'a TopologyRegistry,
    config: &'a LoadConfig,
    model: Model,
    current_chain: Option<(ChainId, char)>,
    current_residue: Option<(ResidueId, ResidueKey)>,
}

impl<'a> Assembler<'a> {
    pub fn new(registry: &'a TopologyRegistry, config: &'a LoadConfig) -> Self {
        Self {
            registry,
            config,
            model: Model::new(),
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn assemble(
        mut self,
        atoms: Vec<Atom>,
        heteroatoms: Vec<Atom>,
        reporter: &ProgressReporter,
        diagnostics: &mut Diagnostics,
    ) -> Model {
        reporter.report(Progress::TaskStart {
            total_steps: (atoms.len() + heteroatoms.len()) as u64,
        });

        for atom in atoms {
            self.add_chain_atom(atom, diagnostics);
            reporter.report(Progress::TaskIncrement);
        }
        self.close_chain();

        for atom in heteroatoms {
            let serial = atom.serial;
            let atom_id = self.model.add_heteroatom(atom);
            if self.config.index_heteroatoms {
                self.index_serial(serial, atom_id, diagnostics);
            }
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        debug!(
            chains = self.model.chain_count(),
            residues = self.model.residue_count(),
            atoms = self.model.chain_atom_count(),
            heteroatoms = self.model.heteroatom_count(),
            "Assembled structural hierarchy"
        );
        self.model
    }

    fn add_chain_atom(&mut self, atom: Atom, diagnostics: &mut Diagnostics) {
        let chain_id = match self.current_chain {
            Some((id, label)) if label == atom.chain_id => id,
            _ => {
                self.close_chain();
                let id = self.model.add_chain(atom.chain_id);
                self.current_chain = Some((id, atom.chain_id));
                id
            }
        };

        let key = (atom.chain_id, atom.residue_number, atom.insertion_code);
        let residue_id = match self.current_residue {
            Some((id, current_key)) if current_key == key => {
                self.check_residue_name(id, &atom, diagnostics);
                id
            }
            _ => {
                self.close_residue();
                let Some(id) = self.model.add_residue(
                    chain_id,
                    atom.residue_number,
                    atom.insertion_code,
                    &atom.residue_name,
                ) else {
                    return;
                };
                self.current_residue = Some((id, key));
                id
            }
        };

        let serial = atom.serial;
        let atom_name = atom.name.clone();
        let Some((atom_id, replaced)) = self.model.add_atom_to_residue(residue_id, atom) else {
            return;
        };
        if replaced.is_some() {
            diagnostics.push(Diagnostic::DuplicateAtomName {
                residue: self.describe_residue(residue_id),
                atom_name,
                serial,
            });
        }
        self.index_serial(serial, atom_id, diagnostics);
    }

    fn check_residue_name(&self, residue_id: ResidueId, atom: &Atom, diagnostics: &mut Diagnostics) {
        let Some(residue) = self.model.residue(residue_id) else {
            return;
        };
        if residue.name != atom.residue_name {
            diagnostics.push(Diagnostic::ConflictingResidueName {
                residue: residue.to_string(),
                conflicting_name: atom.residue_name.clone(),
                serial: atom.serial,
            });
        }
    }

    fn index_serial(&mut self, serial: usize, atom_id: AtomId, diagnostics: &mut Diagnostics) {
        if self.model.index_serial(serial, atom_id).is_some() {
            diagnostics.push(Diagnostic::DuplicateSerial { serial });
        }
    }

    fn describe_residue(&self, residue_id: ResidueId) -> String {
        self.model
            .residue(residue_id)
            .map(|r| r.to_string())
            .unwrap_or_default()
    }

    /// Resolves the intra-residue bonds of the open residue and closes it.
    fn close_residue(&mut self) {
        let Some((residue_id, _)) = self.current_residue.take() else {
            return;
        };
        let Some(residue) = self.model.residue(residue_id) else {
            return;
        };
        let bonds: Vec<Bond> = self
            .registry
            .resolve(&residue.name, |name| residue.has_atom(name))
            .into_iter()
            .filter_map(|(a, b)| {
                Some(Bond::new(
                    residue.get_atom_id_by_name(a)?,
                    residue.get_atom_id_by_name(b)?,
                    BondKind::IntraResidue,
                ))
            })
            .collect();
        if let Some(residue) = self.model.residue_mut(residue_id) {
            residue.bonds = bonds;
        }
    }

    /// Closes the open residue, then derives backbone bonds and the chain type.
    fn close_chain(&mut self) {
        self.close_residue();
        let Some((chain_id, _)) = self.current_chain.take() else {
            return;
        };

        let main_chain: Vec<(AtomId, Point3<f64>)> = self
            .model
            .chain_residues(chain_id)
            .flat_map(|(residue_id, _)| self.model.atoms_in_residue(residue_id))
            .filter(|(_, atom)| is_main_chain_atom(&atom.name))
            .map(|(id, atom)| (id, atom.position))
            .collect();

        let threshold = self.config.backbone_bond_threshold;
        let backbone_bonds: Vec<Bond> = main_chain
            .windows(2)
            .filter(|pair| nalgebra::distance(&pair[0].1, &pair[1].1) < threshold)
            .map(|pair| Bond::new(pair[0].0, pair[1].0, BondKind::Backbone))
            .collect();

        let chain_type = self.infer_chain_type(chain_id);
        if let Some(chain) = self.model.chain_mut(chain_id) {
            chain.backbone_bonds = backbone_bonds;
            chain.chain_type = chain_type;
        }
    }

    fn infer_chain_type(&self, chain_id: ChainId) -> ChainType {
        let residues: Vec<&Residue> = self.model.chain_residues(chain_id).map(|(_, r)| r).collect();
        if residues.is_empty() {
            ChainType::Other
        } else if residues.iter().any(|r| r.residue_type.is_some()) {
            ChainType::Protein
        } else if residues.iter().all(|r| is_dna_residue(&r.name)) {
            ChainType::DNA
        } else if residues.iter().all(|r| is_rna_residue(&r.name)) {
            ChainType::RNA
        } else {
            ChainType::Other
        }
    }
}
