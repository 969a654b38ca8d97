//! SDK error types
//!
//! The text operations never fail; errors come from configuration,
//! structured step-list input and dependency graphs.

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] pipeconf_parser::ParseError),

    /// Graph error
    #[error("Pipeline graph error: {0}")]
    GraphError(#[from] pipeconf_core::CoreError),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
