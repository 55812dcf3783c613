//! Error types for row emission.

use datagen_patterns::PatternError;
use thiserror::Error;

/// Errors that abort an emit run.
///
/// Any cell-level failure is fatal: the run stops at the current row boundary
/// and rows already flushed to the sink stay there.
#[derive(Error, Debug)]
pub enum EmitError {
    /// A cell could not be produced (unknown pattern, empty or misaligned
    /// reference table).
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The sink rejected a write or flush.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
