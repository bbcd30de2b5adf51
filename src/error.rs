//! Error Types
//!
//! Load and query failures for the lexicon.

use ndarray::ShapeError;
use std::io;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors raised while loading or querying a lexicon
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The embeddings file could not be read
    #[error("failed to read embeddings: {0}")]
    Io(#[from] io::Error),

    /// First line is not `<word count> <dimension>`
    #[error("malformed header on line 1: {reason}")]
    MalformedHeader { reason: String },

    /// A data row is missing its word or does not carry `dimension` floats
    #[error("malformed row on line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Number of data rows differs from the header
    #[error("header declares {declared} rows but {found} were found")]
    RowCountMismatch { declared: usize, found: usize },

    /// Row buffer does not fit the declared matrix shape
    #[error("embedding matrix shape mismatch: {0}")]
    Shape(#[from] ShapeError),

    /// The same word was given twice
    #[error("duplicate word `{word}` at entry {position}")]
    DuplicateWord { word: String, position: usize },

    /// Word is not part of the vocabulary
    #[error("word `{0}` is not in the vocabulary")]
    NotFound(String),

    /// Index past the end of the vocabulary
    #[error("index {index} is out of range for a vocabulary of {len} words")]
    OutOfRange { index: usize, len: usize },

    /// Query arguments violate a precondition
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl LexiconError {
    pub(crate) fn header(reason: impl Into<String>) -> Self {
        LexiconError::MalformedHeader {
            reason: reason.into(),
        }
    }

    pub(crate) fn row(line: usize, reason: impl Into<String>) -> Self {
        LexiconError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
