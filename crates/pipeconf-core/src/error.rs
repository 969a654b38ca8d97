//! Error types for pipeconf Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown step kind: {0}")]
    UnknownKind(String),

    #[error("Dependency cycle between steps: {}", .0.join(", "))]
    Cycle(Vec<String>),
}

pub type Result<T> = std::result::Result<T, CoreError>;
