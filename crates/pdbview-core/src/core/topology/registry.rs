use super::rules;
use crate::core::models::residue::AminoAcidType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// A user-supplied side-chain bond template for one residue code.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResidueTemplate {
    pub bonds: Vec<[String; 2]>,
}

/// Built-in bond tables, optionally extended with templates loaded from TOML.
///
/// A template registered under a residue code replaces the built-in side-chain
/// table for that code; the shared carbonyl, alpha carbon, amide and terminal
/// rules still apply.
#[derive(Debug, Clone, Default)]
pub struct TopologyRegistry {
    templates: HashMap<String, ResidueTemplate>,
}

impl TopologyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, TopologyLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TopologyLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let templates: HashMap<String, ResidueTemplate> =
            toml::from_str(&content).map_err(|e| TopologyLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        let templates = templates
            .into_iter()
            .map(|(code, template)| (code.trim().to_ascii_uppercase(), template))
            .collect();
        Ok(Self { templates })
    }

    pub fn get(&self, residue_name: &str) -> Option<&ResidueTemplate> {
        self.templates.get(residue_name.trim().to_ascii_uppercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Produces the intra-residue bonds of a residue as atom-name pairs.
    ///
    /// `has_atom` reports whether the residue contains an atom of the given
    /// name; pairs naming absent atoms are skipped.
    pub fn resolve<'r>(
        &'r self,
        residue_name: &str,
        has_atom: impl Fn(&str) -> bool,
    ) -> Vec<(&'r str, &'r str)> {
        let residue_type = residue_name.parse::<AminoAcidType>().ok();

        let side_chain: Vec<(&'r str, &'r str)> = match self.get(residue_name) {
            Some(template) => template
                .bonds
                .iter()
                .map(|[a, b]| (a.as_str(), b.as_str()))
                .collect(),
            None => residue_type
                .map(rules::side_chain_rules)
                .unwrap_or_default()
                .iter()
                .copied()
                .collect(),
        };

        rules::intra_residue_bonds(residue_type, side_chain, has_atom)
    }
}

#[derive(Debug, Error)]
pub enum TopologyLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_registry(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn all(_: &str) -> bool {
        true
    }

    #[test]
    fn load_parses_templates_and_normalizes_codes() {
        let file = write_registry(
            r#"
[hem]
bonds = [["FE", "NA"], ["FE", "NB"]]

[ALA]
bonds = [["CB", "HB1"]]
"#,
        );
        let registry = TopologyRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("HEM").unwrap().bonds.len(), 2);
        assert!(registry.get("ALA").is_some());
        assert!(registry.get("GLY").is_none());
    }

    #[test]
    fn load_fails_for_nonexistent_file() {
        let result = TopologyRegistry::load(Path::new("/no/such/topology.toml"));
        assert!(matches!(result, Err(TopologyLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_invalid_toml_or_unknown_fields() {
        let bad_syntax = write_registry("[ALA\nbonds = 3");
        assert!(matches!(
            TopologyRegistry::load(bad_syntax.path()),
            Err(TopologyLoadError::Toml { .. })
        ));

        let unknown_field = write_registry("[ALA]\nbonds = []\nangles = []\n");
        assert!(matches!(
            TopologyRegistry::load(unknown_field.path()),
            Err(TopologyLoadError::Toml { .. })
        ));
    }

    #[test]
    fn empty_registry_falls_back_to_built_in_tables() {
        let registry = TopologyRegistry::new();
        assert!(registry.is_empty());
        let resolved = registry.resolve("CYS", all);
        assert_eq!(resolved, rules::standard_bonds("CYS", all));
    }

    #[test]
    fn template_replaces_side_chain_but_keeps_shared_rules() {
        let file = write_registry("[ALA]\nbonds = [[\"CB\", \"XX\"]]\n");
        let registry = TopologyRegistry::load(file.path()).unwrap();
        let resolved = registry.resolve("ALA", all);
        assert_eq!(
            resolved,
            vec![
                ("C", "O"),
                ("CA", "HA"),
                ("CA", "CB"),
                ("N", "H"),
                ("CB", "XX"),
                ("C", "OXT"),
            ]
        );
    }

    #[test]
    fn template_for_unknown_code_applies_with_missing_atoms_skipped() {
        let file = write_registry("[HEM]\nbonds = [[\"FE\", \"NA\"], [\"FE\", \"NZ\"]]\n");
        let registry = TopologyRegistry::load(file.path()).unwrap();
        let resolved = registry.resolve("HEM", |name: &str| matches!(name, "FE" | "NA"));
        assert_eq!(resolved, vec![("FE", "NA")]);
    }
}
