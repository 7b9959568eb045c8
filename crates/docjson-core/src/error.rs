//! Error types for reading, writing and accessing JSON documents.

use thiserror::Error;

/// Errors that can occur while parsing a document or reading a typed value out of one.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The input text was not a well-formed JSON document.
    /// Carries the 1-based line and column where the problem was detected.
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    /// A throwing accessor found nothing (or an explicit null) under the key.
    #[error("missing value for key {key}")]
    Missing { key: String },

    /// A throwing accessor found a value of a kind it cannot coerce.
    #[error("wrong type for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    /// Whether this error came from the parser rather than an accessor or the stream.
    pub fn is_malformed(&self) -> bool {
        matches!(self, JsonError::Malformed { .. })
    }
}

/// Convenience alias used throughout docjson-core.
pub type Result<T> = std::result::Result<T, JsonError>;
