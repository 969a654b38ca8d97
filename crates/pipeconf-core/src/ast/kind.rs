//! Step kind enumeration
//!
//! The closed set of step categories understood by the execution engine.
//! The validator and every presentation layer consume this one enum
//! instead of keeping their own literal lists.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic role of a step in the pipeline graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Batch input (file or table)
    #[serde(rename = "input")]
    Input,
    /// Streaming input
    #[serde(rename = "input-stream")]
    InputStream,
    /// SQL transform
    #[serde(rename = "sql")]
    Sql,
    #[serde(rename = "variable")]
    Variable,
    #[serde(rename = "script")]
    Script,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "customInput")]
    CustomInput,
    #[serde(rename = "avro-serde")]
    AvroSerde,
    /// User-defined function registration
    #[serde(rename = "udf")]
    Udf,
    /// Batch output
    #[serde(rename = "output")]
    Output,
    /// Streaming output
    #[serde(rename = "output-stream")]
    OutputStream,
    #[serde(rename = "parse-json")]
    ParseJson,
}

impl StepKind {
    /// Every kind, in the order the format documents them
    pub const ALL: [StepKind; 12] = [
        StepKind::Input,
        StepKind::InputStream,
        StepKind::Sql,
        StepKind::Variable,
        StepKind::Script,
        StepKind::Custom,
        StepKind::CustomInput,
        StepKind::AvroSerde,
        StepKind::Udf,
        StepKind::Output,
        StepKind::OutputStream,
        StepKind::ParseJson,
    ];

    /// The token used for this kind in pipeline text
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Input => "input",
            StepKind::InputStream => "input-stream",
            StepKind::Sql => "sql",
            StepKind::Variable => "variable",
            StepKind::Script => "script",
            StepKind::Custom => "custom",
            StepKind::CustomInput => "customInput",
            StepKind::AvroSerde => "avro-serde",
            StepKind::Udf => "udf",
            StepKind::Output => "output",
            StepKind::OutputStream => "output-stream",
            StepKind::ParseJson => "parse-json",
        }
    }

    /// Whether a step of this kind is expected to name a `format`.
    ///
    /// Only batch `input` and `output` steps carry this expectation; the
    /// streaming variants take their format from options.
    pub fn requires_format(&self) -> bool {
        matches!(self, StepKind::Input | StepKind::Output)
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, StepKind::InputStream | StepKind::OutputStream)
    }

    /// Kinds that read data from outside the pipeline
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            StepKind::Input | StepKind::InputStream | StepKind::CustomInput
        )
    }

    /// Kinds that write data out of the pipeline
    pub fn is_sink(&self) -> bool {
        matches!(self, StepKind::Output | StepKind::OutputStream)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_its_token() {
        for kind in StepKind::ALL {
            assert_eq!(kind.as_str().parse::<StepKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            "transform".parse::<StepKind>(),
            Err(CoreError::UnknownKind("transform".to_string()))
        );
        // Tokens are case-sensitive
        assert!("Input".parse::<StepKind>().is_err());
        assert!("custominput".parse::<StepKind>().is_err());
    }

    #[test]
    fn test_format_requirement() {
        assert!(StepKind::Input.requires_format());
        assert!(StepKind::Output.requires_format());
        assert!(!StepKind::InputStream.requires_format());
        assert!(!StepKind::Sql.requires_format());
    }

    #[test]
    fn test_streaming_and_roles() {
        assert!(StepKind::InputStream.is_streaming());
        assert!(StepKind::OutputStream.is_streaming());
        assert!(!StepKind::Input.is_streaming());
        assert!(StepKind::CustomInput.is_source());
        assert!(StepKind::OutputStream.is_sink());
        assert!(!StepKind::Sql.is_sink());
    }
}
