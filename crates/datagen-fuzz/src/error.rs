//! Error types for fuzz operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading reference tables or configuring fuzzing.
#[derive(Error, Debug)]
pub enum FuzzError {
    /// IO error while scanning the data directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error while parsing a reference table file.
    #[error("failed to parse reference table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A fuzz probability knob outside the `[0, 1]` range.
    #[error("fuzz probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}
