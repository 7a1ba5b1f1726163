//! Error types for isogloss construction and glottometry scoring

use thiserror::Error;

/// Mattang error type
#[derive(Error, Debug)]
pub enum MattangError {
    /// A precondition on the arguments was violated
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No points were supplied to isogloss construction
    #[error("Input point sequence empty")]
    EmptyInput,

    /// The feature table has non-boolean cells or a broken shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A subgroup query named a language that is not in the table
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A feature column was requested that no language record carries
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MattangError>;
