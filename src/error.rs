//! Crate-level error type.

use crate::parser::ParsingError;
use std::path::PathBuf;

/// Errors that can be returned by the reconciliation pipeline.
#[derive(thiserror::Error, Debug)]
pub enum RttError {
    /// Tree text could not be parsed.
    #[error("failed to parse tree: {0}")]
    Parse(#[from] ParsingError),

    /// A tree lacks the structure an algorithm needs (e.g. a unary root).
    #[error("{0}")]
    Structural(String),

    /// An operation was applied to a tree in an unusable state.
    #[error("{0}")]
    State(String),

    /// Date table columns could not be resolved.
    #[error("{0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a delimited table failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl RttError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RttError::Io {
            path: path.into(),
            source,
        }
    }
}
