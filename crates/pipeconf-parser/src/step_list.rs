//! Structured step-list input
//!
//! Tools that build pipelines programmatically hand over step lists as
//! JSON or YAML rather than in the document format. Both a bare list and
//! an object with a `steps` field are accepted.

use crate::error::{ParseError, Result};
use pipeconf_core::ast::Step;
use serde::Deserialize;
use std::path::Path;

/// Encoding of a structured step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepListFormat {
    Json,
    Yaml,
}

impl StepListFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StepListFormat::Json,
            _ => StepListFormat::Yaml,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepListInput {
    Bare(Vec<Step>),
    Wrapped { steps: Vec<Step> },
}

impl StepListInput {
    fn into_steps(self) -> Vec<Step> {
        match self {
            StepListInput::Bare(steps) | StepListInput::Wrapped { steps } => steps,
        }
    }
}

/// Parse a structured step list.
///
/// Every step needs a non-blank `id` and `kind`; the first one missing
/// either is reported as `steps[<index>].<field>`.
pub fn parse_step_list(text: &str, format: StepListFormat) -> Result<Vec<Step>> {
    let input: StepListInput = match format {
        StepListFormat::Json => serde_json::from_str(text)?,
        StepListFormat::Yaml => serde_yaml::from_str(text)?,
    };
    let steps = input.into_steps();

    for (index, step) in steps.iter().enumerate() {
        if step.id.trim().is_empty() {
            return Err(ParseError::MissingField {
                field: format!("steps[{}].id", index),
            });
        }
        if step.kind.trim().is_empty() {
            return Err(ParseError::MissingField {
                field: format!("steps[{}].kind", index),
            });
        }
    }

    log::debug!("parsed {} steps from {:?} step list", steps.len(), format);
    Ok(steps)
}
