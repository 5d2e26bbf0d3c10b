use super::load_structure;
use crate::cli::SequenceArgs;
use crate::error::{CliError, Result};
use pdbview::core::models::system::Model;
use std::fmt::{self, Write};

const LINE_WIDTH: usize = 60;

pub fn run(args: SequenceArgs, show_progress: bool) -> Result<()> {
    let result = load_structure(&args.input, &args.load, show_progress)?;
    let report = render(&result.model).map_err(|e| CliError::Other(e.into()))?;
    print!("{report}");
    Ok(())
}

fn render(model: &Model) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();

    for sequence in model.sequences() {
        let declared = sequence
            .declared_length
            .map(|n| format!(", {n} declared"))
            .unwrap_or_default();
        writeln!(
            out,
            ">{} SEQRES ({} residues{declared})",
            sequence.chain_id,
            sequence.residues.len()
        )?;
        push_wrapped(&mut out, &sequence.one_letter());
    }

    for (chain_id, chain) in model.chains() {
        let observed: String = model
            .chain_residues(chain_id)
            .map(|(_, residue)| residue.one_letter_code())
            .collect();
        writeln!(
            out,
            ">{} observed ({} residues, {})",
            chain.id,
            chain.residue_count(),
            chain.chain_type
        )?;
        push_wrapped(&mut out, &observed);
    }

    Ok(out)
}

fn push_wrapped(out: &mut String, sequence: &str) {
    let chars: Vec<char> = sequence.chars().collect();
    for line in chars.chunks(LINE_WIDTH) {
        out.extend(line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdbview::engine::config::LoadConfig;
    use pdbview::engine::progress::ProgressReporter;
    use pdbview::workflows::load;
    use std::io::Cursor;

    const STRUCTURE: &str = "\
SEQRES   1 A    3  ALA GLY HOH
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00 20.00           C
ATOM      2  CA  GLY A   2       3.800   0.000   0.000  1.00 20.00           C
ATOM      3  CA  MSE A   3       7.600   0.000   0.000  1.00 20.00           C
";

    fn model(content: &str) -> Model {
        let mut reader = Cursor::new(content.as_bytes());
        load::run(&mut reader, &LoadConfig::default(), &ProgressReporter::new())
            .unwrap()
            .model
    }

    #[test]
    fn seqres_and_observed_sequences_are_rendered() {
        let out = render(&model(STRUCTURE)).unwrap();
        assert_eq!(
            out,
            ">A SEQRES (3 residues, 3 declared)\nAGX\n>A observed (3 residues, Protein)\nAGX\n"
        );
    }

    #[test]
    fn long_sequences_wrap() {
        let mut out = String::new();
        push_wrapped(&mut out, &"A".repeat(LINE_WIDTH + 5));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), LINE_WIDTH);
        assert_eq!(lines[1], "AAAAA");
    }

    #[test]
    fn empty_model_renders_nothing() {
        assert_eq!(render(&model("")).unwrap(), "");
    }
}
