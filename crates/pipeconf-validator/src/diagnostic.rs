//! Validation diagnostics and results

use serde::{Deserialize, Serialize};

/// Severity level for validation diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single diagnostic message from validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,

    /// Error/warning code (e.g., "E004", "W001")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Step the diagnostic is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,

    /// Line number (1-based, if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code: code.into(),
            message: message.into(),
            step_id: None,
            line: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code: code.into(),
            message: message.into(),
            step_id: None,
            line: None,
        }
    }

    pub fn with_step(mut self, step_id: impl Into<String>) -> Self {
        self.step_id = Some(step_id.into());
        self
    }

    /// Add a line location; `None` leaves the diagnostic unlocated
    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Result of validating a pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub valid: bool,

    /// Error messages, in the order the checks ran
    pub errors: Vec<String>,

    /// Warning messages; these never affect `valid`
    pub warnings: Vec<String>,

    /// Every error and warning with its code and location
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let (errors, warnings): (Vec<&Diagnostic>, Vec<&Diagnostic>) =
            diagnostics.iter().partition(|diagnostic| diagnostic.is_error());
        let errors: Vec<String> = errors.into_iter().map(|d| d.message.clone()).collect();
        let warnings = warnings.into_iter().map(|d| d.message.clone()).collect();

        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            diagnostics,
        }
    }

    /// Diagnostics carrying the given code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.code == code)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.with_code(code).next().is_some()
    }
}
