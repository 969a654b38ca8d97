//! pipeconf Parser - text <-> step list for pipeline configuration documents
//!
//! This crate provides:
//! - A grammar for the block-style document format (mappings, sequences,
//!   literal block scalars)
//! - Lowering of the parsed tree into [`Step`](pipeconf_core::Step) lists
//!   and top-level metadata
//! - The serializer ([`Emitter`]) that produces the same format
//! - Structured (JSON / YAML) step-list input for tools

pub mod emitter;
pub mod error;
pub mod grammar;
pub mod metadata;
pub mod pipeline_parser;
pub mod step_list;
mod step_parser;

// Re-export main parser types
pub use emitter::{serialize, Emitter, EmitterOptions};
pub use error::{ParseError, Result};
pub use grammar::SyntaxIssue;
pub use metadata::extract_metadata;
pub use pipeline_parser::{parse_steps, ParsedDocument, PipelineParser};
pub use step_list::{parse_step_list, StepListFormat};
