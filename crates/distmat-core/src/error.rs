//! Error taxonomy shared by the loader, matrix layer, and CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a run can hit. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range user input (dimensions, backend name, ragged rows).
    #[error("{0}")]
    Argument(String),

    /// Operand shapes cannot be multiplied.
    #[error("number of columns in A ({cols_a}) must match the rows of B ({rows_b})")]
    DimensionMismatch { cols_a: usize, rows_b: usize },

    /// The sample file could not be opened or read.
    #[error("could not open input file {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sample file does not follow the `count, samples...` layout.
    #[error("malformed sample data in {}: {reason}", path.display())]
    MalformedSampleData { path: PathBuf, reason: String },

    /// A sample or matrix buffer could not be reserved. `what` names the buffer.
    #[error("could not allocate memory for {requested} {what}")]
    AllocationFailure { what: String, requested: u128 },
}

impl Error {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedSampleData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_both_extents() {
        let e = Error::DimensionMismatch {
            cols_a: 3,
            rows_b: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("(3)"));
        assert!(msg.contains("(2)"));
    }

    #[test]
    fn test_malformed_message_names_path() {
        let e = Error::malformed("gaussian/input-A-0-1.txt", "missing sample count");
        assert_eq!(
            e.to_string(),
            "malformed sample data in gaussian/input-A-0-1.txt: missing sample count"
        );
    }

    #[test]
    fn test_allocation_message_names_buffer() {
        let e = Error::AllocationFailure {
            what: "entries of a 3x3 matrix".into(),
            requested: 9,
        };
        assert_eq!(
            e.to_string(),
            "could not allocate memory for 9 entries of a 3x3 matrix"
        );
    }

    #[test]
    fn test_source_unavailable_keeps_io_source() {
        use std::error::Error as _;
        let e = Error::SourceUnavailable {
            path: PathBuf::from("nope.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("could not open input file nope.txt"));
    }
}
