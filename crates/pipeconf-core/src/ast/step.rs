//! Step definitions
//!
//! A step is one node of the pipeline graph. The `kind` decides which of
//! the optional attributes are meaningful, but nothing here enforces that;
//! judging a step is the validator's job.

use super::kind::StepKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single pipeline step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step identifier (required, unique within a pipeline)
    pub id: String,

    /// Raw kind token as written in the document.
    ///
    /// Kept as text so that documents with unknown kinds still parse;
    /// use [`Step::step_kind`] to resolve it.
    pub kind: String,

    /// One-line summary shown in graph views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,

    /// Primary upstream step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Free-form engine options, order preserved
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, String>,

    /// Additional upstream steps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Editor coordinates (presentation only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// 2D coordinate of a step in the visual editor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Step {
    /// Create a step with the two mandatory attributes
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Create a step of a known kind
    pub fn of_kind(id: impl Into<String>, kind: StepKind) -> Self {
        Self::new(id, kind.as_str())
    }

    /// Resolve the kind token against the closed enumeration
    pub fn step_kind(&self) -> Option<StepKind> {
        self.kind.parse().ok()
    }

    /// All upstream references: `source` first, then `dependsOn` in order
    pub fn upstream(&self) -> impl Iterator<Item = &str> {
        self.source
            .as_deref()
            .into_iter()
            .chain(self.depends_on.iter().map(String::as_str))
    }

    pub fn with_short_desc(mut self, short_desc: impl Into<String>) -> Self {
        self.short_desc = Some(short_desc.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Append an extra upstream reference
    pub fn depends_on(mut self, step_id: impl Into<String>) -> Self {
        self.depends_on.push(step_id.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_kind_resolution() {
        assert_eq!(Step::new("a", "sql").step_kind(), Some(StepKind::Sql));
        assert_eq!(Step::new("a", "bogus").step_kind(), None);
        assert_eq!(
            Step::of_kind("a", StepKind::AvroSerde).kind,
            "avro-serde".to_string()
        );
    }

    #[test]
    fn test_upstream_lists_source_before_depends_on() {
        let step = Step::new("join", "sql")
            .with_source("left")
            .depends_on("right")
            .depends_on("lookup");

        let upstream: Vec<&str> = step.upstream().collect();
        assert_eq!(upstream, vec!["left", "right", "lookup"]);

        let lone = Step::new("read", "input");
        assert_eq!(lone.upstream().count(), 0);
    }

    #[test]
    fn test_options_keep_insertion_order() {
        let step = Step::new("read", "input")
            .with_option("header", "true")
            .with_option("delimiter", ";")
            .with_option("encoding", "utf-8");

        let keys: Vec<&str> = step.options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["header", "delimiter", "encoding"]);
    }
}
