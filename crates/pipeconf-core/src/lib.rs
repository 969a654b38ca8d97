//! pipeconf Core - data model for pipeline configuration documents
//!
//! This crate provides the types shared by the parser, the validator and
//! any presentation layer:
//! - Step kinds (the closed enumeration)
//! - Steps and pipeline documents
//! - Dependency graph helpers over `source` / `dependsOn` edges
//! - Error types

pub mod ast;
pub mod error;
pub mod graph;

// Re-export commonly used types
pub use ast::{PipelineDocument, PipelineMetadata, Position, Step, StepKind};
pub use error::{CoreError, Result};
