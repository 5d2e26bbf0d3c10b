use crate::cli::LoadArgs;
use crate::error::{CliError, Result};
use pdbview::engine::config::{LoadConfig, LoadConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load settings as they may appear in a `pdbview.toml` file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialLoadConfig {
    backbone_bond_threshold: Option<f64>,
    strict: Option<bool>,
    index_heteroatoms: Option<bool>,
    topology_path: Option<PathBuf>,
}

impl PartialLoadConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, or starts from defaults when none is given.
    pub fn from_args(args: &LoadArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line values take precedence; switches given on the command
    /// line can only turn a setting on.
    pub fn merge_with_cli(self, args: &LoadArgs) -> Result<LoadConfig> {
        let mut builder = LoadConfigBuilder::new()
            .strict(args.strict || self.strict.unwrap_or(false))
            .index_heteroatoms(args.index_heteroatoms || self.index_heteroatoms.unwrap_or(false));

        if let Some(threshold) = args.threshold.or(self.backbone_bond_threshold) {
            builder = builder.backbone_bond_threshold(threshold);
        }
        if let Some(path) = args.topology.clone().or(self.topology_path) {
            builder = builder.topology_path(path);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}
