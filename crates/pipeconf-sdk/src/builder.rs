//! Builder pattern for PipelineEditor

use crate::config::SdkConfig;
use crate::editor::PipelineEditor;

/// Builder for PipelineEditor
///
/// # Example
///
/// ```rust,ignore
/// use pipeconf_sdk::PipelineEditorBuilder;
///
/// let editor = PipelineEditorBuilder::new()
///     .with_indent(4)
///     .report_warnings(false)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineEditorBuilder {
    config: SdkConfig,
}

impl PipelineEditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn with_config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    /// Spaces per nesting level in serialized output (clamped to 1-9)
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.config.emitter.indent = indent;
        self
    }

    /// Pipeline id written when a document has none
    pub fn with_placeholder_id(mut self, placeholder_id: impl Into<String>) -> Self {
        self.config.emitter.placeholder_id = placeholder_id.into();
        self
    }

    pub fn report_warnings(mut self, enabled: bool) -> Self {
        self.config.validator.report_warnings = enabled;
        self
    }

    pub fn report_syntax_issues(mut self, enabled: bool) -> Self {
        self.config.validator.report_syntax_issues = enabled;
        self
    }

    pub fn build(self) -> PipelineEditor {
        PipelineEditor::new(&self.config)
    }
}
