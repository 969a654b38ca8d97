//! Pipeline editor
//!
//! The five text operations bound to one configuration: serialize, parse,
//! extract metadata, validate and merge. Every operation is a pure
//! function of its input, so one editor may be shared across threads.

use crate::config::SdkConfig;
use crate::error::Result;
use pipeconf_core::ast::{PipelineDocument, PipelineMetadata, Step};
use pipeconf_parser::{
    extract_metadata, parse_step_list, Emitter, ParsedDocument, PipelineParser, StepListFormat,
};
use pipeconf_validator::{PipelineValidator, ValidationResult};

/// Configured entry point for editing pipeline documents
#[derive(Debug, Clone)]
pub struct PipelineEditor {
    emitter: Emitter,
    validator: PipelineValidator,
}

impl Default for PipelineEditor {
    fn default() -> Self {
        Self::new(&SdkConfig::default())
    }
}

impl PipelineEditor {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            emitter: Emitter::with_options(config.emitter.clone()),
            validator: PipelineValidator::with_options(config.validator.clone()),
        }
    }

    /// Serialize steps under the given pipeline id and description
    pub fn serialize(&self, steps: &[Step], pipeline_id: Option<&str>, pipeline_desc: Option<&str>) -> String {
        self.emitter.emit(steps, pipeline_id, pipeline_desc)
    }

    pub fn serialize_document(&self, doc: &PipelineDocument) -> String {
        self.emitter.emit_document(doc)
    }

    /// Steps of a document; empty when there is no usable `steps` section
    pub fn parse(&self, text: &str) -> Vec<Step> {
        PipelineParser::parse_steps(text)
    }

    /// Full parse with metadata, step lines and skipped lines
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        PipelineParser::parse(text)
    }

    pub fn extract_metadata(&self, text: &str) -> PipelineMetadata {
        extract_metadata(text)
    }

    pub fn validate(&self, text: &str) -> ValidationResult {
        self.validator.validate(text)
    }

    pub fn validate_document(&self, doc: &PipelineDocument) -> ValidationResult {
        self.validator.validate_document(doc)
    }

    /// Replace the steps of `existing`, keeping its `id` and `desc`.
    ///
    /// Comments, formatting and any other top-level keys of `existing`
    /// are not carried over.
    pub fn merge(&self, existing: &str, new_steps: &[Step]) -> String {
        let metadata = extract_metadata(existing);
        tracing::debug!(
            "merging {} steps into pipeline {:?}",
            new_steps.len(),
            metadata.id
        );
        self.serialize(new_steps, metadata.id.as_deref(), metadata.desc.as_deref())
    }

    /// Re-serialize a document in canonical layout
    pub fn format(&self, text: &str) -> String {
        let parsed = self.parse_document(text);
        self.serialize_document(&parsed.document)
    }

    /// Serialize a structured (JSON/YAML) step list
    pub fn render_step_list(
        &self,
        steps: &str,
        format: StepListFormat,
        pipeline_id: Option<&str>,
        pipeline_desc: Option<&str>,
    ) -> Result<String> {
        let steps = parse_step_list(steps, format)?;
        Ok(self.serialize(&steps, pipeline_id, pipeline_desc))
    }

    /// Merge a structured (JSON/YAML) step list into `existing`
    pub fn merge_step_list(&self, existing: &str, steps: &str, format: StepListFormat) -> Result<String> {
        let steps = parse_step_list(steps, format)?;
        Ok(self.merge(existing, &steps))
    }

    /// Step ids in dependency order; fails on a cycle
    pub fn execution_order(&self, text: &str) -> Result<Vec<String>> {
        let doc = self.parse_document(text).into_document();
        let order = doc.execution_order()?;
        Ok(order.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeconf_parser::EmitterOptions;

    #[test]
    fn test_editor_uses_configured_emitter() {
        let config = SdkConfig {
            emitter: EmitterOptions {
                indent: 4,
                placeholder_id: "draft".to_string(),
            },
            ..SdkConfig::default()
        };
        let editor = PipelineEditor::new(&config);

        let text = editor.serialize(&[Step::new("a", "sql")], None, None);
        assert_eq!(text, "id: draft\n\nsteps:\n    - id: a\n      kind: sql");
    }

    #[test]
    fn test_format_normalizes_layout() {
        let editor = PipelineEditor::default();
        let text = "id:   p\nsteps:\n- id: a\n  kind: input\n  format: \"csv\"\n";
        assert_eq!(
            editor.format(text),
            "id: p\n\nsteps:\n  - id: a\n    kind: input\n    format: csv"
        );
    }

    #[test]
    fn test_execution_order() {
        let editor = PipelineEditor::default();
        let text = "id: p\nsteps:\n  - id: b\n    kind: sql\n    source: a\n  - id: a\n    kind: input\n";
        assert_eq!(editor.execution_order(text).unwrap(), vec!["a", "b"]);

        let cyclic = "id: p\nsteps:\n  - id: a\n    kind: sql\n    source: a\n";
        assert!(editor.execution_order(cyclic).is_err());
    }
}
