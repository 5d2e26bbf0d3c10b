use super::load_structure;
use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use pdbview::core::models::system::Model;
use pdbview::workflows::load::LoadResult;
use std::fmt::{self, Write};

pub fn run(args: InspectArgs, show_progress: bool) -> Result<()> {
    let result = load_structure(&args.input, &args.load, show_progress)?;
    let report = render(&result, &args).map_err(|e| CliError::Other(e.into()))?;
    print!("{report}");
    Ok(())
}

fn render(result: &LoadResult, args: &InspectArgs) -> std::result::Result<String, fmt::Error> {
    let model = &result.model;
    let mut out = String::new();

    writeln!(out, "{}", args.input.display())?;
    writeln!(out, "{}", model.summary())?;

    if args.residues {
        out.push('\n');
        render_residues(&mut out, model)?;
    }

    if args.metadata {
        out.push_str("\nMetadata:\n");
        for line in model.metadata().lines() {
            writeln!(out, "  {line}")?;
        }
    }

    if args.diagnostics {
        writeln!(out, "\nDiagnostics ({}):", result.diagnostics.summary())?;
        for diagnostic in &result.diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }

    Ok(out)
}

fn render_residues(out: &mut impl Write, model: &Model) -> fmt::Result {
    for (chain_id, chain) in model.chains() {
        writeln!(
            out,
            "Chain {} ({}, {} residues)",
            chain.id,
            chain.chain_type,
            chain.residue_count()
        )?;
        for (_, residue) in model.chain_residues(chain_id) {
            writeln!(
                out,
                "  {:<12} {:>3} atoms, {:>3} bonds",
                residue.to_string(),
                residue.atom_count(),
                residue.bonds().len()
            )?;
        }
    }
    let heteroatoms = model.heteroatom_count();
    if heteroatoms > 0 {
        writeln!(out, "Heteroatoms ({heteroatoms})")?;
    }
    Ok(())
}
