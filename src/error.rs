//! Error types for the gridworld crate

use thiserror::Error;

/// Main error type for the gridworld crate
///
/// The error taxonomy is deliberately small: out-of-bounds cell reads and
/// writes are handled with sentinels and no-ops rather than errors, so the
/// update loop stays branch-free on the common path. Errors only arise at
/// construction boundaries and in the I/O layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("map descriptor has no cells (empty first row or empty string)")]
    EmptyMap,

    #[error("no legal actions available from ({x}, {y})")]
    NoLegalActions { x: i32, y: i32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
