//! Error types for linesweep.

use std::path::PathBuf;

use thiserror::Error;

use crate::reader::ReaderState;

/// Main error type for linesweep operations.
#[derive(Error, Debug)]
pub enum LinesweepError {
    /// The underlying source could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already open source failed.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// A line was requested after the reader was closed.
    #[error("reader used after close")]
    UseAfterClose,

    /// Nesting went deeper than the flattener allows.
    #[error("recursion limit exceeded: nesting deeper than {limit} levels")]
    RecursionLimitExceeded { limit: usize },

    /// Mode string is unknown or does not allow reading.
    #[error("invalid mode: '{0}'")]
    InvalidMode(String),

    /// Invalid reader lifecycle transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition { from: ReaderState, to: ReaderState },

    /// JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for linesweep operations.
pub type Result<T> = std::result::Result<T, LinesweepError>;
