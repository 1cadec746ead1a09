//! Library error type.

use thiserror::Error;

/// `Error` covers training input and configuration failures. Scoring never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed line in a misspellings file.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Raw counts were added after the tables were turned into rates.
    #[error("confusion tables are already normalized")]
    AlreadyNormalized,

    /// Normalization was requested without the raw training text.
    #[error("normalization needs the raw training text")]
    MissingBaseline,

    /// The tokenizer expression failed to compile.
    #[error("invalid tokenizer expression")]
    Regex(#[from] regex::Error),

    /// Reading an input file failed.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// A config file was not valid JSON for [`crate::Config`].
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),
}

/// `Result` with the library [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
