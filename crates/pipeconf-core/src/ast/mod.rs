//! Pipeline document model
//!
//! - Step kinds
//! - Steps
//! - Pipeline documents and their top-level metadata

pub mod document;
pub mod kind;
pub mod step;

pub use document::{PipelineDocument, PipelineMetadata};
pub use kind::StepKind;
pub use step::{Position, Step};
