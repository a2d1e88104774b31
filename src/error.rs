//! Error types for the ETL pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pipeline.
///
/// Extraction is the only fallible phase. Transform and load stages are
/// total over well-formed record sets and have no error variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The text source could not be opened or read.
    #[error("failed to read source '{path}': {source}", path = .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_path_and_cause() {
        let err = PipelineError::source_unavailable(
            "missing.csv",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_source_is_io_error() {
        let err = PipelineError::source_unavailable(
            "data.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = err.source().expect("io error should be chained");
        assert_eq!(source.to_string(), "denied");
    }
}
