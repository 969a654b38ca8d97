//! Pipeline document parser
//!
//! Parses document text into a [`PipelineDocument`]. The parser is
//! permissive: it never fails, it drops what it cannot use and leaves the
//! judging to the validator.

use crate::error::{ParseError, Result};
use crate::grammar::{parse_tree, SyntaxIssue};
use crate::metadata::metadata_from_tree;
use crate::step_parser::lower_steps;
use pipeconf_core::ast::{PipelineDocument, Step};

/// Everything the parser learned about a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub document: PipelineDocument,

    /// Whether a top-level `steps` key exists, regardless of its content
    pub has_steps_section: bool,

    /// 1-based line of each step, parallel to `document.steps`
    pub step_lines: Vec<usize>,

    /// Lines the grammar skipped
    pub issues: Vec<SyntaxIssue>,
}

impl ParsedDocument {
    pub fn steps(&self) -> &[Step] {
        &self.document.steps
    }

    /// Line of the step at `index` in document order
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.step_lines.get(index).copied()
    }

    pub fn into_document(self) -> PipelineDocument {
        self.document
    }
}

/// Pipeline parser
pub struct PipelineParser;

impl PipelineParser {
    /// Parse a document, keeping line information and syntax issues
    pub fn parse(text: &str) -> ParsedDocument {
        let (root, issues) = parse_tree(text);
        let metadata = metadata_from_tree(&root);

        let section = root.get("steps");
        let (steps, step_lines): (Vec<Step>, Vec<usize>) = section
            .map(lower_steps)
            .unwrap_or_default()
            .into_iter()
            .unzip();

        for issue in &issues {
            log::debug!("skipped {}", issue);
        }

        ParsedDocument {
            document: PipelineDocument::from_parts(metadata, steps),
            has_steps_section: section.is_some(),
            step_lines,
            issues,
        }
    }

    /// Parse only the step list; empty when the `steps` section is
    /// missing or holds no usable entries
    pub fn parse_steps(text: &str) -> Vec<Step> {
        Self::parse(text).document.steps
    }

    /// Parse a document, failing on the first line the grammar skipped
    pub fn parse_strict(text: &str) -> Result<PipelineDocument> {
        let parsed = Self::parse(text);
        match parsed.issues.into_iter().next() {
            Some(issue) => Err(ParseError::Syntax {
                line: issue.line,
                message: issue.message,
            }),
            None => Ok(parsed.document),
        }
    }
}

/// Parse the step list of a document
pub fn parse_steps(text: &str) -> Vec<Step> {
    PipelineParser::parse_steps(text)
}
