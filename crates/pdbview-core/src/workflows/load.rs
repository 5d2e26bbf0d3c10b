use crate::core::io::pdb::{PdbError, PdbFile, PdbReadOptions};
use crate::core::io::traits::StructureFile;
use crate::core::models::system::Model;
use crate::core::topology::registry::TopologyRegistry;
use crate::engine::annotation;
use crate::engine::assembly::Assembler;
use crate::engine::config::LoadConfig;
use crate::engine::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct LoadResult {
    pub model: Model,
    pub diagnostics: Diagnostics,
}

/// Parses a PDB stream and builds its structural model.
///
/// Only an invalid config, a failing reader, a malformed record in strict
/// mode, or an unreadable topology file aborts the load; every other
/// irregularity is collected in [`LoadResult::diagnostics`].
#[instrument(skip_all, name = "load_workflow")]
pub fn run(
    reader: &mut impl BufRead,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Result<LoadResult, EngineError> {
    config.validate()?;

    let registry = match &config.topology_path {
        Some(path) => {
            info!("Loading residue templates from '{}'.", path.display());
            TopologyRegistry::load(path)?
        }
        None => TopologyRegistry::new(),
    };

    // === Phase 1: Record parsing ===
    let options = PdbReadOptions {
        strict: config.strict,
    };
    let parsed = reporter
        .phase("Parsing", || PdbFile::read_from(reader, &options))
        .map_err(|e| match e {
            PdbError::Io(source) => EngineError::SourceUnavailable { path: None, source },
            PdbError::Malformed { line, record, kind } => EngineError::MalformedRecord {
                line,
                record,
                source: kind,
            },
        })?;
    info!(
        "Parsed {} atom and {} heteroatom record(s).",
        parsed.atoms.len(),
        parsed.heteroatoms.len()
    );
    if parsed.ignored_atoms > 0 {
        debug!(
            ignored = parsed.ignored_atoms,
            "Ignored ATOM records beyond the first model"
        );
    }

    let mut diagnostics = Diagnostics::new();
    for malformed in parsed.malformed {
        diagnostics.push(Diagnostic::MalformedRecord {
            line: malformed.line,
            record: malformed.record,
            error: malformed.error,
        });
    }

    // === Phase 2: Hierarchy assembly ===
    let mut model = reporter.phase("Assembling", || {
        Assembler::new(&registry, config).assemble(
            parsed.atoms,
            parsed.heteroatoms,
            reporter,
            &mut diagnostics,
        )
    });

    // === Phase 3: Annotation resolution ===
    reporter.phase("Resolving annotations", || {
        annotation::resolve(
            &mut model,
            parsed.secondary_structures,
            &parsed.links,
            config,
            reporter,
            &mut diagnostics,
        )
    });

    if !diagnostics.is_empty() {
        reporter.report(Progress::Message(format!(
            "Loaded with warnings: {}",
            diagnostics.summary()
        )));
    }

    model.set_sequences(parsed.sequences);
    model.set_metadata(parsed.metadata);
    model.set_model_count(parsed.model_count);

    info!(
        "Load complete: {} chain(s), {} residue(s), {}.",
        model.chain_count(),
        model.residue_count(),
        diagnostics.summary()
    );
    Ok(LoadResult { model, diagnostics })
}

/// Opens `path` and runs [`run`] on its contents.
pub fn run_path(
    path: &Path,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Result<LoadResult, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::SourceUnavailable {
        path: Some(path.to_path_buf()),
        source,
    })?;
    let mut reader = BufReader::new(file);
    run(&mut reader, config, reporter).map_err(|e| match e {
        EngineError::SourceUnavailable { path: None, source } => EngineError::SourceUnavailable {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::chain::ChainType;
    use crate::core::models::secondary::Resolution;
    use crate::core::models::topology::{Bond, BondKind};
    use crate::engine::config::LoadConfigBuilder;
    use crate::engine::diagnostics::DiagnosticClass;
    use std::collections::HashSet;
    use std::io::{self, Cursor, Read, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        res: &str,
        chain: char,
        seq: isize,
        pos: [f64; 3],
        element: &str,
    ) -> String {
        format!(
            "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record, serial, name, res, chain, seq, pos[0], pos[1], pos[2], 1.0, 20.0, element
        )
    }

    fn atom(serial: usize, name: &str, res: &str, chain: char, seq: isize, pos: [f64; 3]) -> String {
        let element = &name[..1];
        atom_line("ATOM", serial, &format!(" {name}"), res, chain, seq, pos, element)
    }

    fn hetatm(serial: usize, name: &str, res: &str, chain: char, seq: isize) -> String {
        atom_line("HETATM", serial, &format!(" {name}"), res, chain, seq, [9.0, 9.0, 9.0], &name[..1])
    }

    fn two_residue_file() -> String {
        [
            "HEADER    HYDROLASE                               01-JAN-00   1ABC".to_string(),
            atom(1, "N", "ALA", 'A', 1, [0.0, 0.0, 0.0]),
            atom(2, "CA", "ALA", 'A', 1, [1.46, 0.0, 0.0]),
            atom(3, "C", "ALA", 'A', 1, [2.0, 1.42, 0.0]),
            atom(4, "O", "ALA", 'A', 1, [1.5, 2.5, 0.0]),
            atom(5, "N", "GLY", 'A', 2, [3.33, 1.54, 0.0]),
            atom(6, "CA", "GLY", 'A', 2, [4.0, 2.8, 0.0]),
            atom(7, "C", "GLY", 'A', 2, [5.5, 2.8, 0.0]),
            hetatm(8, "O", "HOH", 'A', 101),
            "END".to_string(),
        ]
        .join("\n")
    }

    fn load(content: &str) -> LoadResult {
        load_with(content, &LoadConfig::default())
    }

    fn load_with(content: &str, config: &LoadConfig) -> LoadResult {
        let mut reader = Cursor::new(content.as_bytes());
        run(&mut reader, config, &ProgressReporter::new()).unwrap()
    }

    fn bond_names(model: &Model, bonds: &[Bond]) -> HashSet<(String, String)> {
        bonds
            .iter()
            .map(|bond| {
                let (a, b) = model.bond_atoms(bond).unwrap();
                let key = |atom: &crate::core::models::atom::Atom| {
                    format!("{}:{}{}", atom.chain_id, atom.residue_number, atom.name)
                };
                let (a, b) = (key(a), key(b));
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect()
    }

    fn all_bonds(model: &Model) -> Vec<Bond> {
        model.bonds().copied().collect()
    }

    #[test]
    fn two_residue_scenario_builds_one_chain_with_backbone() {
        let result = load(&two_residue_file());
        let model = &result.model;

        assert_eq!(model.chain_count(), 1);
        let (chain_id, chain) = model.chains().next().unwrap();
        assert_eq!(chain.id, 'A');
        assert_eq!(chain.chain_type, ChainType::Protein);
        assert_eq!(model.chain_residues(chain_id).count(), 2);
        assert_eq!(chain.backbone_bonds().len(), 5);
        assert!(chain
            .backbone_bonds()
            .iter()
            .all(|bond| bond.kind == BondKind::Backbone));
        assert_eq!(model.heteroatom_count(), 1);
        assert_eq!(model.model_count(), 1);
        assert!(model.metadata().starts_with("HYDROLASE"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn atom_count_matches_retained_records() {
        let result = load(&two_residue_file());
        let model = &result.model;
        assert_eq!(model.chain_atom_count() + model.heteroatom_count(), 8);
        assert_eq!(model.atom_count(), 8);
    }

    #[test]
    fn second_model_block_is_ignored_except_for_heteroatoms() {
        let content = [
            "MODEL        1".to_string(),
            atom(1, "N", "ALA", 'A', 1, [0.0, 0.0, 0.0]),
            atom(2, "CA", "ALA", 'A', 1, [1.46, 0.0, 0.0]),
            hetatm(3, "O", "HOH", 'A', 101),
            "ENDMDL".to_string(),
            "MODEL        2".to_string(),
            atom(4, "N", "ALA", 'A', 1, [0.1, 0.0, 0.0]),
            atom(5, "CA", "ALA", 'A', 1, [1.5, 0.0, 0.0]),
            hetatm(6, "O", "HOH", 'A', 101),
            "ENDMDL".to_string(),
        ]
        .join("\n");
        let model = load(&content).model;

        assert_eq!(model.model_count(), 2);
        assert_eq!(model.chain_atom_count(), 2);
        assert!(model.atom_by_serial(4).is_none());
        assert_eq!(model.heteroatom_count(), 2);
    }

    #[test]
    fn parsing_twice_gives_identical_models() {
        let content = format!(
            "{}\nCONECT    3    4\nHELIX    1   1 ALA A    1  GLY A    2  1                                   2\n",
            two_residue_file()
        );
        let first = load(&content).model;
        let second = load(&content).model;

        let partition = |model: &Model| -> Vec<Vec<Vec<usize>>> {
            model
                .chains()
                .map(|(chain_id, _)| {
                    model
                        .chain_residues(chain_id)
                        .map(|(rid, _)| model.atoms_in_residue(rid).map(|(_, a)| a.serial).collect())
                        .collect()
                })
                .collect()
        };
        assert_eq!(partition(&first), partition(&second));
        assert_eq!(
            bond_names(&first, &all_bonds(&first)),
            bond_names(&second, &all_bonds(&second))
        );
        assert_eq!(first.metadata(), second.metadata());
        assert_eq!(first.summary(), second.summary());
    }

    #[test]
    fn missing_atoms_give_a_subset_of_bonds() {
        let complete = load(&two_residue_file()).model;
        let without_carbonyl: String = two_residue_file()
            .lines()
            .filter(|line| !line.starts_with("ATOM      3"))
            .collect::<Vec<_>>()
            .join("\n");
        let partial = load(&without_carbonyl).model;

        let full = bond_names(&complete, &all_bonds(&complete));
        let subset = bond_names(&partial, &all_bonds(&partial));
        assert!(subset.len() < full.len());
        assert!(subset.is_subset(&full));
    }

    #[test]
    fn conect_with_missing_serial_yields_one_fewer_bond() {
        let content = format!("{}\nCONECT    3    5   99\n", two_residue_file());
        let result = load(&content);

        assert_eq!(result.model.explicit_bonds().len(), 1);
        assert_eq!(
            result.diagnostics.count(DiagnosticClass::UnresolvedAnnotation),
            1
        );
    }

    #[test]
    fn helix_naming_absent_chain_resolves_to_empty() {
        let content = format!(
            "{}\nHELIX    1   1 ALA Z    1  GLY Z    2  1                                   2\n",
            two_residue_file()
        );
        let result = load(&content);
        let helix = result.model.helices().next().unwrap();
        assert_eq!(helix.resolution(), Resolution::Empty);
        assert_eq!(
            result.diagnostics.count(DiagnosticClass::UnresolvedAnnotation),
            1
        );
    }

    fn sheet(chain: char, start: isize, end: isize) -> String {
        format!(
            "SHEET  {:>3} {:>3}{:>2} {:>3} {}{:>4}  {:>3} {}{:>4} {:>2}",
            1, "S1", 2, "ALA", chain, start, "GLY", chain, end, 0
        )
    }

    #[test]
    fn sheet_strand_resolves_to_its_residues() {
        let content = format!("{}\n{}\n", two_residue_file(), sheet('A', 1, 2));
        let result = load(&content);
        let model = &result.model;

        let strand = model.sheets().next().unwrap();
        assert!(strand.is_resolved());
        let seqs: Vec<isize> = model
            .residues_in_range(strand)
            .into_iter()
            .map(|id| model.residue(id).unwrap().sequence_number)
            .collect();
        assert_eq!(seqs, vec![1, 2]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn sheet_strand_naming_absent_chain_resolves_to_empty() {
        let content = format!("{}\n{}\n", two_residue_file(), sheet('Z', 1, 2));
        let result = load(&content);

        let strand = result.model.sheets().next().unwrap();
        assert_eq!(strand.resolution(), Resolution::Empty);
        assert!(result.model.residues_in_range(strand).is_empty());
        assert!(matches!(
            result.diagnostics.iter().next(),
            Some(Diagnostic::UnresolvedAnnotation { reason, .. }) if reason == "no chain 'Z'"
        ));
    }

    #[test]
    fn reversed_helix_is_empty_and_diagnosed() {
        let content = format!(
            "{}\nHELIX    1   1 GLY A    2  ALA A    1  1                                   2\n",
            two_residue_file()
        );
        let result = load(&content);
        assert!(result.model.helices().next().unwrap().is_empty());
        assert_eq!(
            result.diagnostics.count(DiagnosticClass::UnresolvedAnnotation),
            1
        );
    }

    #[test]
    fn invalid_hand_built_config_is_rejected() {
        let config = LoadConfig {
            backbone_bond_threshold: f64::NAN,
            ..LoadConfig::default()
        };
        let mut reader = Cursor::new(two_residue_file().into_bytes());
        let err = run(&mut reader, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn warnings_are_announced_through_progress_messages() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::Message(text) = event {
                sink.lock().unwrap().push(text);
            }
        }));

        let content = format!("{}\nCONECT    3   99\n", two_residue_file());
        let mut reader = Cursor::new(content.into_bytes());
        run(&mut reader, &LoadConfig::default(), &reporter).unwrap();
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["Loaded with warnings: 1 unresolved annotation".to_string()]
        );

        messages.lock().unwrap().clear();
        let mut reader = Cursor::new(two_residue_file().into_bytes());
        run(&mut reader, &LoadConfig::default(), &reporter).unwrap();
        assert!(messages.lock().unwrap().is_empty());
    }

    #[test]
    fn malformed_lines_become_diagnostics_or_errors_in_strict_mode() {
        let content = format!("{}\nATOM      9  CB  ALA A   1      1.000\n", two_residue_file());

        let result = load(&content);
        assert_eq!(result.model.chain_atom_count(), 7);
        assert_eq!(result.diagnostics.count(DiagnosticClass::MalformedRecord), 1);

        let strict = LoadConfigBuilder::new().strict(true).build().unwrap();
        let mut reader = Cursor::new(content.as_bytes());
        let err = run(&mut reader, &strict, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::MalformedRecord { .. }));
    }

    #[test]
    fn empty_input_gives_empty_model() {
        let result = load("");
        assert!(result.model.is_empty());
        assert_eq!(result.model.model_count(), 0);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn phases_are_reported_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::PhaseStart { name } = event {
                sink.lock().unwrap().push(name);
            }
        }));
        let mut reader = Cursor::new(two_residue_file().into_bytes());
        run(&mut reader, &LoadConfig::default(), &reporter).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["Parsing", "Assembling", "Resolving annotations"]
        );
    }

    #[test]
    fn topology_templates_are_loaded_from_config() {
        let mut templates = NamedTempFile::new().unwrap();
        write!(templates, "[HOH]\nbonds = []\n[ALA]\nbonds = [[\"CA\", \"N\"]]\n").unwrap();
        let config = LoadConfigBuilder::new()
            .topology_path(templates.path().to_path_buf())
            .build()
            .unwrap();

        let model = load_with(&two_residue_file(), &config).model;
        let residue_id = model.find_residue('A', 1, None).unwrap();
        let names = bond_names(&model, model.residue(residue_id).unwrap().bonds());
        assert!(names.contains(&("A:1CA".to_string(), "A:1N".to_string())));
    }

    #[test]
    fn missing_topology_file_is_fatal() {
        let config = LoadConfigBuilder::new()
            .topology_path("/no/such/templates.toml".into())
            .build()
            .unwrap();
        let mut reader = Cursor::new(two_residue_file().into_bytes());
        let err = run(&mut reader, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Topology { .. }));
    }

    #[test]
    fn run_path_reads_files_and_reports_missing_paths() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", two_residue_file()).unwrap();
        let result = run_path(file.path(), &LoadConfig::default(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.model.residue_count(), 2);

        let err = run_path(
            Path::new("/no/such/structure.pdb"),
            &LoadConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::SourceUnavailable { path: Some(_), .. }
        ));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
        }
    }

    #[test]
    fn failing_reader_aborts_without_a_model() {
        let mut reader = io::BufReader::new(FailingReader);
        let err = run(&mut reader, &LoadConfig::default(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::SourceUnavailable { path: None, .. }));
    }
}
