//! Pipeline validator
//!
//! Structural checks on the text (E001, E002), then the step checks of
//! [`crate::analyzer`] on whatever the permissive parser recovered. All
//! applicable diagnostics are reported together; validation never fails.

use crate::analyzer::analyze_steps;
use crate::diagnostic::{Diagnostic, ValidationResult};
use pipeconf_core::ast::PipelineDocument;
use pipeconf_parser::PipelineParser;
use serde::{Deserialize, Serialize};

/// Validator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Report warnings (W0xx) alongside errors
    pub report_warnings: bool,

    /// Report lines the grammar skipped as W101 warnings
    pub report_syntax_issues: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            report_warnings: true,
            report_syntax_issues: true,
        }
    }
}

/// Validator for pipeline documents
#[derive(Debug, Clone, Default)]
pub struct PipelineValidator {
    options: ValidatorOptions,
}

impl PipelineValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Validate document text
    pub fn validate(&self, text: &str) -> ValidationResult {
        let parsed = PipelineParser::parse(text);
        let mut diagnostics = Vec::new();

        // E001: top-level id
        if parsed.document.id.is_none() {
            diagnostics.push(Diagnostic::error("E001", "Pipeline must have an 'id' field"));
        }

        // E002: steps section
        if !parsed.has_steps_section {
            diagnostics.push(Diagnostic::error("E002", "Pipeline must have a 'steps' section"));
        }
        diagnostics.extend(analyze_steps(parsed.steps(), &parsed.step_lines));

        if self.options.report_warnings && self.options.report_syntax_issues {
            diagnostics.extend(parsed.issues.iter().map(|issue| {
                Diagnostic::warning("W101", issue.to_string()).with_line(Some(issue.line))
            }));
        }

        self.finish(diagnostics)
    }

    /// Validate an already structured document.
    ///
    /// There is no text, so E002 cannot occur and diagnostics carry no lines.
    pub fn validate_document(&self, doc: &PipelineDocument) -> ValidationResult {
        let mut diagnostics = Vec::new();

        if doc.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            diagnostics.push(Diagnostic::error("E001", "Pipeline must have an 'id' field"));
        }
        diagnostics.extend(analyze_steps(&doc.steps, &[]));

        self.finish(diagnostics)
    }

    fn finish(&self, mut diagnostics: Vec<Diagnostic>) -> ValidationResult {
        if !self.options.report_warnings {
            diagnostics.retain(Diagnostic::is_error);
        }

        let result = ValidationResult::from_diagnostics(diagnostics);
        log::debug!(
            "validation finished: {} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        );
        result
    }
}

/// Validate document text with default options
pub fn validate(text: &str) -> ValidationResult {
    PipelineValidator::new().validate(text)
}

/// Validate a structured document with default options
pub fn validate_document(doc: &PipelineDocument) -> ValidationResult {
    PipelineValidator::new().validate_document(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeconf_core::ast::Step;

    #[test]
    fn test_empty_text() {
        let result = validate("");
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Pipeline must have an 'id' field",
                "Pipeline must have a 'steps' section",
                "Pipeline must have at least one step"
            ]
        );
        assert_eq!(
            validate("desc: x\n").errors,
            validate("").errors,
            "metadata alone changes nothing"
        );
    }

    #[test]
    fn test_steps_section_without_entries() {
        let result = validate("id: p\nsteps:\n");
        assert_eq!(result.errors, vec!["Pipeline must have at least one step"]);
    }

    #[test]
    fn test_step_lines_are_attached() {
        let result = validate("id: p\nsteps:\n  - id: a\n    kind: bogus\n");
        let diagnostic = result.with_code("E005").next().unwrap();
        assert_eq!(diagnostic.line, Some(3));
        assert_eq!(diagnostic.step_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_syntax_issues_are_warnings() {
        let result = validate("id: p\nnot a key\nsteps:\n  - id: a\n    kind: sql\n");
        assert!(result.valid, "errors: {:?}", result.errors);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.has_code("W101"));
    }

    #[test]
    fn test_warnings_can_be_suppressed() {
        let validator = PipelineValidator::with_options(ValidatorOptions {
            report_warnings: false,
            ..ValidatorOptions::default()
        });
        let result = validator.validate("id: p\nnot a key\nsteps:\n  - id: a\n    kind: sql\n    source: a\n");
        assert!(result.valid);
        assert!(result.warnings.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_validate_document() {
        let doc = PipelineDocument {
            id: Some(" ".to_string()),
            desc: None,
            steps: vec![Step::new("a", "input")],
        };
        let result = validate_document(&doc);
        assert_eq!(
            result.errors,
            vec![
                "Pipeline must have an 'id' field",
                "Step 'a' of kind 'input' should specify a 'format'"
            ]
        );
        assert!(result.diagnostics.iter().all(|d| d.line.is_none()));
    }
}
