//! pipeconf SDK
//!
//! High-level API for the pipeline configuration format: serialize step
//! lists to document text, parse text back, extract top-level metadata,
//! validate documents and merge new steps into an existing document.
//!
//! The free functions use default settings; build a [`PipelineEditor`]
//! to apply an [`SdkConfig`].

pub mod builder;
pub mod config;
pub mod editor;
pub mod error;

// Re-export main types
pub use builder::PipelineEditorBuilder;
pub use config::SdkConfig;
pub use editor::PipelineEditor;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use pipeconf_core::ast::{PipelineDocument, PipelineMetadata, Position, Step, StepKind};
pub use pipeconf_parser::{EmitterOptions, ParsedDocument, StepListFormat};
pub use pipeconf_validator::{
    Diagnostic, DiagnosticSeverity, ValidationResult, ValidatorOptions,
};

/// Serialize steps to document text
pub fn serialize(steps: &[Step], pipeline_id: Option<&str>, pipeline_desc: Option<&str>) -> String {
    pipeconf_parser::serialize(steps, pipeline_id, pipeline_desc)
}

/// Parse the steps of a document; never fails
pub fn parse(text: &str) -> Vec<Step> {
    pipeconf_parser::parse_steps(text)
}

/// Top-level `id` and `desc` of a document
pub fn extract_metadata(text: &str) -> PipelineMetadata {
    pipeconf_parser::extract_metadata(text)
}

/// Validate document text; never fails
pub fn validate(text: &str) -> ValidationResult {
    pipeconf_validator::validate(text)
}

/// Replace the steps of `existing`, keeping its `id` and `desc`
pub fn merge(existing: &str, new_steps: &[Step]) -> String {
    PipelineEditor::default().merge(existing, new_steps)
}
