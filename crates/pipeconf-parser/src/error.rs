//! Parser error types
//!
//! The document parser itself never fails; these errors come from the
//! strict entry points and from structured step-list input.

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON step-list parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML step-list parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Line the document grammar could not place
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
