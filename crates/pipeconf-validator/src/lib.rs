//! pipeconf Validator - checks for pipeline configuration documents
//!
//! Errors:
//! - E001 missing top-level `id`
//! - E002 missing `steps` section
//! - E003 no usable steps
//! - E004 duplicate step id
//! - E005 unknown step kind
//! - E006 input/output step without `format`
//! - E007 unknown `source`
//! - E008 unknown `dependsOn` entry
//!
//! Warnings (never affect validity):
//! - W001 dependency cycle
//! - W002 step referencing itself
//! - W101 line skipped by the parser

mod analyzer;
pub mod diagnostic;
pub mod validator;

pub use diagnostic::{Diagnostic, DiagnosticSeverity, ValidationResult};
pub use validator::{validate, validate_document, PipelineValidator, ValidatorOptions};
