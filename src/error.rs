//! Error type shared by the reader, the route model and the annealing engine.

use thiserror::Error;

/// Errors raised while loading an instance or running a search.
///
/// Every variant is fatal for the current run; there is nothing to retry.
#[derive(Debug, Error)]
pub enum TspError {
    /// The problem file could not be opened or read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A header or body field could not be parsed. `line` is 1-based.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Input violates an invariant (route shape, parameters, dimension).
    #[error("validation error: {0}")]
    Validation(String),
}

impl TspError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TspError::Validation(message.into())
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        TspError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
