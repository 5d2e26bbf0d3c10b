use super::config::LoadConfig;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::progress::{Progress, ProgressReporter};
use crate::core::models::annotation::{AtomSpecifier, ExplicitLink};
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::secondary::{ResidueSpecifier, SecondaryStructure};
use crate::core::models::system::Model;
use crate::core::models::topology::{Bond, BondKind};
use tracing::debug;

/// Resolves secondary-structure ranges and explicit links against an
/// assembled model, storing the ranges and bonds on it.
///
/// Anything naming an absent chain, residue or atom is recorded as an
/// `UnresolvedAnnotation` diagnostic and resolution continues.
pub fn resolve(
    model: &mut Model,
    secondary_structures: Vec<SecondaryStructure>,
    links: &[ExplicitLink],
    config: &LoadConfig,
    reporter: &ProgressReporter,
    diagnostics: &mut Diagnostics,
) {
    reporter.report(Progress::TaskStart {
        total_steps: (secondary_structures.len() + links.len()) as u64,
    });

    for mut structure in secondary_structures {
        resolve_range(model, &mut structure, diagnostics);
        model.secondary_structures_mut().push(structure);
        reporter.report(Progress::TaskIncrement);
    }

    let mut resolved = 0usize;
    for link in links {
        match resolve_link(model, link, config) {
            Ok((a, b)) => {
                model.push_explicit_bond(Bond::new(a, b, BondKind::ExplicitLink));
                resolved += 1;
            }
            Err(reason) => diagnostics.push(Diagnostic::UnresolvedAnnotation {
                annotation: link.to_string(),
                reason,
            }),
        }
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    debug!(
        ranges = model.secondary_structures().len(),
        links = links.len(),
        resolved,
        "Resolved annotations"
    );
}

fn resolve_range(model: &Model, structure: &mut SecondaryStructure, diagnostics: &mut Diagnostics) {
    let endpoints = find_residue(model, &structure.start)
        .and_then(|start| find_residue(model, &structure.end).map(|end| (start, end)))
        .and_then(|(start, end)| check_span(model, start, end).map(|()| (start, end)));
    match endpoints {
        Ok((start, end)) => {
            structure.resolve(start, end);
        }
        Err(reason) => {
            structure.mark_empty();
            let label = if structure.is_helix() { "HELIX" } else { "SHEET" };
            diagnostics.push(Diagnostic::UnresolvedAnnotation {
                annotation: format!(
                    "{label} {} ({} -> {})",
                    structure.identifier, structure.start, structure.end
                ),
                reason,
            });
        }
    }
}

fn find_residue(model: &Model, wanted: &ResidueSpecifier) -> Result<ResidueId, String> {
    if model.find_chain_by_id(wanted.chain_id).is_none() {
        return Err(format!("no chain '{}'", wanted.chain_id));
    }
    model
        .find_residue(wanted.chain_id, wanted.sequence_number, wanted.insertion_code)
        .ok_or_else(|| format!("no residue {wanted}"))
}

fn check_span(model: &Model, start: ResidueId, end: ResidueId) -> Result<(), String> {
    if model.residues_between(start, end).is_some() {
        return Ok(());
    }
    let chain_of = |id| model.residue(id).map(|residue| residue.chain);
    if chain_of(start) != chain_of(end) {
        Err("start and end lie in different chains".to_string())
    } else {
        Err("start residue follows end residue".to_string())
    }
}

fn resolve_link(
    model: &Model,
    link: &ExplicitLink,
    config: &LoadConfig,
) -> Result<(AtomId, AtomId), String> {
    match link {
        ExplicitLink::Connect { serial_a, serial_b } => {
            let find = |serial: usize| {
                model
                    .find_atom_by_serial(serial)
                    .ok_or_else(|| format!("no atom with serial {serial}"))
            };
            Ok((find(*serial_a)?, find(*serial_b)?))
        }
        ExplicitLink::Link { first, second, .. } => Ok((
            find_named_atom(model, first, config)?,
            find_named_atom(model, second, config)?,
        )),
    }
}

fn find_named_atom(
    model: &Model,
    wanted: &AtomSpecifier,
    config: &LoadConfig,
) -> Result<AtomId, String> {
    let wanted_residue = &wanted.residue;
    let in_chain = model
        .find_residue(
            wanted_residue.chain_id,
            wanted_residue.sequence_number,
            wanted_residue.insertion_code,
        )
        .and_then(|id| model.residue(id))
        .and_then(|residue| residue.get_atom_id_by_name(&wanted.atom_name));
    if let Some(id) = in_chain {
        return Ok(id);
    }

    if config.index_heteroatoms {
        let hetero = model.heteroatoms().find(|(_, atom)| {
            atom.chain_id == wanted_residue.chain_id
                && atom.residue_number == wanted_residue.sequence_number
                && atom.insertion_code == wanted_residue.insertion_code
                && atom.name == wanted.atom_name
        });
        if let Some((id, _)) = hetero {
            return Ok(id);
        }
    }

    Err(format!("no atom {wanted}"))
}
