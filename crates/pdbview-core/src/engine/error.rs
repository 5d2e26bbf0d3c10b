use super::config::ConfigError;
use crate::core::io::records::{RecordError, RecordKind};
use crate::core::topology::registry::TopologyLoadError;
use std::path::PathBuf;
use thiserror::Error;

fn describe_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("'{}'", path.display()),
        None => "<stream>".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot read structure source {}: {source}", describe_source(.path))]
    SourceUnavailable {
        path: Option<PathBuf>,
        source: std::io::Error,
    },

    #[error("Malformed {record} record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        record: RecordKind,
        source: RecordError,
    },

    #[error("Failed to load residue templates: {source}")]
    Topology {
        #[from]
        source: TopologyLoadError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_unavailable_message_names_the_path() {
        let err = EngineError::SourceUnavailable {
            path: Some(PathBuf::from("1abc.pdb")),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read structure source '1abc.pdb': not found"
        );

        let err = EngineError::SourceUnavailable {
            path: None,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"),
        };
        assert_eq!(err.to_string(), "Cannot read structure source <stream>: truncated");
    }

    #[test]
    fn malformed_record_message_includes_line_and_record() {
        let err = EngineError::MalformedRecord {
            line: 12,
            record: RecordKind::Atom,
            source: RecordError::MissingRequiredField {
                columns: "7-11".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Malformed ATOM record on line 12: Required field in columns 7-11 is empty"
        );
    }
}
