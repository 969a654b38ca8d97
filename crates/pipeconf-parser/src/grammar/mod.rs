//! Document grammar
//!
//! The format is a restricted, block-style subset of YAML:
//!
//! ```text
//! document   := mapping
//! mapping    := entry*                       all entries at one column
//! entry      := KEY ':' (inline | block_scalar | NEWLINE nested)
//! nested     := mapping | sequence           deeper, or a sequence at the same column
//! sequence   := ('-' (inline | entry mapping | NEWLINE nested))*
//! block_scalar := '|' [indicator] NEWLINE lines indented deeper than KEY
//! ```
//!
//! Parsing never fails. Lines the grammar cannot place are skipped and
//! reported as [`SyntaxIssue`]s.

mod lines;
mod node;
mod parser;

pub use node::{Entry, Item, Node};
pub use parser::parse_tree;
pub(crate) use parser::unquote;

use std::fmt;

/// A line the grammar skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl SyntaxIssue {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
