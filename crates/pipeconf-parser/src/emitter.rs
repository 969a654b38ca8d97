//! Serializer for pipeline documents
//!
//! Emits the block-style text format the parser reads. Attribute order is
//! fixed so output is deterministic and diffs stay small:
//!
//! id, kind, shortDesc, source, format, path, sql, cache, show, schema,
//! options, dependsOn, desc, position
//!
//! Values are never escaped. Text that would read back differently inline
//! (embedded newlines, surrounding whitespace, a leading `|`, wrapping
//! quotes) is written as a literal block scalar instead. Option keys and
//! `dependsOn` entries have no block form, so those are double-quoted
//! when they would not read back bare.

use pipeconf_core::ast::{PipelineDocument, Step};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Emitter options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterOptions {
    /// Spaces per nesting level (1-9)
    pub indent: usize,

    /// Pipeline id written when none is given
    pub placeholder_id: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            placeholder_id: "new-pipeline".to_string(),
        }
    }
}

/// Pipeline document serializer
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    options: EmitterOptions,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EmitterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    /// Serialize a step list under the given pipeline id and description
    pub fn emit(&self, steps: &[Step], pipeline_id: Option<&str>, pipeline_desc: Option<&str>) -> String {
        let mut out = Output::new(self.options.indent.clamp(1, 9));

        let id = pipeline_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(self.options.placeholder_id.as_str());
        out.text(0, "", "id", id);
        if let Some(desc) = pipeline_desc.filter(|desc| !desc.trim().is_empty()) {
            out.text(0, "", "desc", desc);
        }
        out.blank();
        out.line(0, "steps:");

        for (idx, step) in steps.iter().enumerate() {
            if idx > 0 {
                out.blank();
            }
            out.step(step);
        }

        out.finish()
    }

    pub fn emit_document(&self, doc: &PipelineDocument) -> String {
        self.emit(&doc.steps, doc.id.as_deref(), doc.desc.as_deref())
    }
}

/// Serialize with default options
pub fn serialize(steps: &[Step], pipeline_id: Option<&str>, pipeline_desc: Option<&str>) -> String {
    Emitter::new().emit(steps, pipeline_id, pipeline_desc)
}

struct Output {
    indent: usize,
    lines: Vec<String>,
}

impl Output {
    fn new(indent: usize) -> Self {
        Self {
            indent,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, column: usize, content: &str) {
        self.lines.push(format!("{:column$}{}", "", content, column = column));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn step(&mut self, step: &Step) {
        let item = self.indent;
        let attr = item + 2;
        let nested = attr + self.indent;

        self.text(item, "- ", "id", &step.id);
        self.text(attr, "", "kind", &step.kind);
        self.optional_text(attr, "shortDesc", step.short_desc.as_deref());
        self.optional_text(attr, "source", step.source.as_deref());
        self.optional_text(attr, "format", step.format.as_deref());
        self.optional_text(attr, "path", step.path.as_deref());
        self.optional_text(attr, "sql", step.sql.as_deref());
        self.optional_bool(attr, "cache", step.cache);
        self.optional_bool(attr, "show", step.show);
        self.optional_text(attr, "schema", step.schema.as_deref());

        if !step.options.is_empty() {
            self.line(attr, "options:");
            for (key, value) in &step.options {
                self.text(nested, "", &token(key), value);
            }
        }

        if !step.depends_on.is_empty() {
            self.line(attr, "dependsOn:");
            for upstream in &step.depends_on {
                self.line(nested, &format!("- {}", token(upstream)));
            }
        }

        self.optional_text(attr, "desc", step.desc.as_deref());

        if let Some(position) = step.position {
            self.line(attr, "position:");
            self.line(nested, &format!("x: {}", position.x));
            self.line(nested, &format!("y: {}", position.y));
        }
    }

    fn optional_text(&mut self, column: usize, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(column, "", key, value);
        }
    }

    fn optional_bool(&mut self, column: usize, key: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.line(column, &format!("{}: {}", key, value));
        }
    }

    /// `key: value`, or a literal block scalar when inline would not read back
    fn text(&mut self, column: usize, lead: &str, key: &str, value: &str) {
        if value.is_empty() {
            self.line(column, &format!("{}{}:", lead, key));
            return;
        }
        if !needs_block(value) {
            self.line(column, &format!("{}{}: {}", lead, key, value));
            return;
        }

        // Content indentation is measured from the key, not the dash
        let key_column = column + lead.len();
        let body_column = key_column + self.indent;
        let leading_space = value
            .split('\n')
            .find(|line| !line.trim().is_empty())
            .is_some_and(|line| line.starts_with([' ', '\t']));
        let header = if leading_space {
            format!("{}{}: |{}", lead, key, self.indent)
        } else {
            format!("{}{}: |", lead, key)
        };

        self.line(column, &header);
        for body in value.split('\n') {
            if body.is_empty() {
                self.blank();
            } else {
                self.line(body_column, body);
            }
        }
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|line| line.trim().is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

fn needs_block(value: &str) -> bool {
    value.contains('\n')
        || value.starts_with('|')
        || value.trim() != value
        || is_quoted(value)
}

/// A mapping key or sequence item, quoted when bare text would be
/// misread as a comment, a nested entry, a sequence item or a quoted value
fn token(value: &str) -> Cow<'_, str> {
    let bare = !value.is_empty()
        && value.trim() == value
        && !value.starts_with(['"', '\'', '#'])
        && !value.ends_with(':')
        && !value.contains(": ")
        && !value.contains('\n')
        && value != "-"
        && !value.starts_with("- ");
    if bare {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}
