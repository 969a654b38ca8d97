//! Lowering of the `steps` section into [`Step`]s
//!
//! Matching is kind-agnostic: every known attribute is read from every
//! item, and unknown attributes are ignored.

use crate::grammar::{Item, Node};
use indexmap::IndexMap;
use pipeconf_core::ast::{Position, Step};

/// Lower every sequence item that carries both `id` and `kind`.
///
/// Returns each step with the line its item started on. Items missing
/// either attribute are dropped; that is tolerance, not an error.
pub(crate) fn lower_steps(section: &Node) -> Vec<(Step, usize)> {
    let Some(items) = section.as_sequence() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match lower_step(item) {
            Some(step) => Some((step, item.line)),
            None => {
                log::debug!("line {}: step item without id or kind dropped", item.line);
                None
            }
        })
        .collect()
}

fn lower_step(item: &Item) -> Option<Step> {
    let node = &item.value;
    let id = node.get_text("id")?.trim();
    let kind = node.get_text("kind")?.trim();

    Some(Step {
        id: id.to_string(),
        kind: kind.to_string(),
        short_desc: text(node, "shortDesc"),
        source: text(node, "source"),
        format: text(node, "format"),
        path: text(node, "path"),
        sql: text(node, "sql"),
        cache: boolean(node, "cache"),
        show: boolean(node, "show"),
        schema: text(node, "schema"),
        options: options(node),
        depends_on: depends_on(node),
        desc: text(node, "desc"),
        position: position(node),
    })
}

/// Scalar or block text, empty values included
fn text(node: &Node, key: &str) -> Option<String> {
    node.get(key).and_then(Node::as_text).map(str::to_string)
}

/// Only the literal tokens `true` and `false` count
fn boolean(node: &Node, key: &str) -> Option<bool> {
    match node.get(key)? {
        Node::Scalar(value) if value == "true" => Some(true),
        Node::Scalar(value) if value == "false" => Some(false),
        _ => None,
    }
}

fn options(node: &Node) -> IndexMap<String, String> {
    let mut options = IndexMap::new();
    if let Some(entries) = node.get("options").and_then(Node::as_mapping) {
        for entry in entries {
            if let Some(value) = entry.value.as_text() {
                options
                    .entry(entry.key.clone())
                    .or_insert_with(|| value.to_string());
            }
        }
    }
    options
}

/// Block sequence, flow sequence (`[a, b]`) or a single bare id
fn depends_on(node: &Node) -> Vec<String> {
    match node.get("dependsOn") {
        Some(Node::Sequence(items)) => items
            .iter()
            .filter_map(|item| item.value.as_text())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Node::Scalar(value)) => {
            let inner = value
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .unwrap_or(value.as_str());
            inner
                .split(',')
                .map(|id| crate::grammar::unquote(id.trim()))
                .filter(|id| !id.is_empty())
                .collect()
        }
        _ => Vec::new(),
    }
}

fn position(node: &Node) -> Option<Position> {
    let position = node.get("position")?;
    let x = position.get_text("x")?.trim().parse().ok()?;
    let y = position.get_text("y")?.trim().parse().ok()?;
    Some(Position::new(x, y))
}
