//! Top-level metadata extraction

use crate::grammar::{parse_tree, Node};
use pipeconf_core::ast::PipelineMetadata;

/// Read the top-level `id` and `desc` of a document.
///
/// Only keys of the root mapping count; an `id` nested under `steps` is
/// never picked up. Blank values are treated as absent.
pub fn extract_metadata(text: &str) -> PipelineMetadata {
    let (root, _) = parse_tree(text);
    metadata_from_tree(&root)
}

pub(crate) fn metadata_from_tree(root: &Node) -> PipelineMetadata {
    PipelineMetadata {
        id: root.get_text("id").map(|id| id.trim().to_string()),
        desc: root.get_text("desc").map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metadata() {
        let meta = extract_metadata("id: orders\ndesc: Daily orders\n\nsteps:\n  - id: read\n    kind: input\n");
        assert_eq!(meta.id.as_deref(), Some("orders"));
        assert_eq!(meta.desc.as_deref(), Some("Daily orders"));
    }

    #[test]
    fn test_nested_id_is_not_metadata() {
        let meta = extract_metadata("steps:\n  - id: read\n    kind: input\n");
        assert_eq!(meta, PipelineMetadata::default());
    }

    #[test]
    fn test_first_top_level_id_wins() {
        let meta = extract_metadata("id: first\nid: second\n");
        assert_eq!(meta.id.as_deref(), Some("first"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let meta = extract_metadata("id:   \ndesc:\nsteps:\n");
        assert_eq!(meta, PipelineMetadata::default());
    }

    #[test]
    fn test_block_description() {
        let meta = extract_metadata("id: p\ndesc: |\n  Line one\n  Line two\nsteps:\n");
        assert_eq!(meta.desc.as_deref(), Some("Line one\nLine two"));
    }
}
