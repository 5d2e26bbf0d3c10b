use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pdbview - Inspect Protein Data Bank files as a hierarchy of chains, residues and atoms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a structure and print a summary of its hierarchy, bonds and annotations.
    Inspect(InspectArgs),
    /// Print the SEQRES sequences and the observed residue sequence of each chain.
    Sequence(SequenceArgs),
}

/// Options shared by every command that loads a structure.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the maximum backbone bond length in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Abort on the first malformed record instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Make heteroatoms reachable from CONECT and LINK records.
    #[arg(long)]
    pub index_heteroatoms: bool,

    /// Additional residue bond templates in TOML format.
    #[arg(long, value_name = "PATH")]
    pub topology: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,

    // --- Report Sections ---
    /// List the residues of every chain.
    #[arg(long)]
    pub residues: bool,

    /// Print the HEADER, TITLE and REMARK text.
    #[arg(long)]
    pub metadata: bool,

    /// List every diagnostic raised while loading.
    #[arg(long)]
    pub diagnostics: bool,
}

/// Arguments for the `sequence` subcommand.
#[derive(Args, Debug)]
pub struct SequenceArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_parses_flags_and_load_overrides() {
        let cli = Cli::try_parse_from([
            "pdbview",
            "-vv",
            "inspect",
            "1abc.pdb",
            "--threshold",
            "1.8",
            "--strict",
            "--residues",
            "-c",
            "pdbview.toml",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.input, PathBuf::from("1abc.pdb"));
        assert_eq!(args.load.threshold, Some(1.8));
        assert!(args.load.strict);
        assert!(!args.load.index_heteroatoms);
        assert_eq!(args.load.config, Some(PathBuf::from("pdbview.toml")));
        assert!(args.residues);
        assert!(!args.metadata);
    }

    #[test]
    fn sequence_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pdbview",
            "sequence",
            "1abc.pdb",
            "--quiet",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(cli.command, Commands::Sequence(_)));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["pdbview", "-q", "-v", "inspect", "1abc.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn input_path_is_required() {
        assert!(Cli::try_parse_from(["pdbview", "inspect"]).is_err());
    }
}
