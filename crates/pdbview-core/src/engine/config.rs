use std::path::PathBuf;
use thiserror::Error;

/// Default upper bound, in Angstroms, for bonding consecutive main-chain atoms.
pub const DEFAULT_BACKBONE_BOND_THRESHOLD: f64 = 2.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    /// Consecutive N/CA/C atoms closer than this are bonded.
    pub backbone_bond_threshold: f64,
    /// Abort on the first malformed record instead of skipping it.
    pub strict: bool,
    /// Make heteroatoms reachable by serial number and LINK specifiers.
    pub index_heteroatoms: bool,
    /// Optional TOML file with additional residue templates.
    pub topology_path: Option<PathBuf>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            backbone_bond_threshold: DEFAULT_BACKBONE_BOND_THRESHOLD,
            strict: false,
            index_heteroatoms: false,
            topology_path: None,
        }
    }
}

impl LoadConfig {
    /// Checks the invariants `LoadConfigBuilder::build` enforces, for configs
    /// assembled by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.backbone_bond_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "backbone_bond_threshold",
                reason: format!("must be a positive finite distance, got {threshold}"),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct LoadConfigBuilder {
    backbone_bond_threshold: Option<f64>,
    strict: Option<bool>,
    index_heteroatoms: Option<bool>,
    topology_path: Option<PathBuf>,
}

impl LoadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backbone_bond_threshold(mut self, threshold: f64) -> Self {
        self.backbone_bond_threshold = Some(threshold);
        self
    }
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }
    pub fn index_heteroatoms(mut self, index: bool) -> Self {
        self.index_heteroatoms = Some(index);
        self
    }
    pub fn topology_path(mut self, path: PathBuf) -> Self {
        self.topology_path = Some(path);
        self
    }

    pub fn build(self) -> Result<LoadConfig, ConfigError> {
        let defaults = LoadConfig::default();
        let config = LoadConfig {
            backbone_bond_threshold: self
                .backbone_bond_threshold
                .unwrap_or(defaults.backbone_bond_threshold),
            strict: self.strict.unwrap_or(defaults.strict),
            index_heteroatoms: self.index_heteroatoms.unwrap_or(defaults.index_heteroatoms),
            topology_path: self.topology_path,
        };
        config.validate()?;
        Ok(config)
    }
}
