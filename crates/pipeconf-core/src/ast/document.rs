//! Pipeline document definitions

use super::step::Step;
use serde::{Deserialize, Serialize};

/// A named, described, ordered collection of steps
///
/// Step order is significant: it is the default execution and layout
/// order when no explicit edges exist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// Pipeline identifier (may be absent while a document is being edited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// The steps, in document order
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Top-level scalars of a pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl PipelineDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            desc: None,
            steps: Vec::new(),
        }
    }

    /// Build a document from metadata and a step list
    pub fn from_parts(metadata: PipelineMetadata, steps: Vec<Step>) -> Self {
        Self {
            id: metadata.id,
            desc: metadata.desc,
            steps,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn metadata(&self) -> PipelineMetadata {
        PipelineMetadata {
            id: self.id.clone(),
            desc: self.desc.clone(),
        }
    }

    /// First step with the given id.
    ///
    /// Documents may contain duplicate ids (a validation error, not a
    /// structural impossibility); the earliest one wins here.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn step_mut(&mut self, id: &str) -> Option<&mut Step> {
        self.steps.iter_mut().find(|step| step.id == id)
    }

    /// Step ids in document order, duplicates included
    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.id.as_str())
    }

    pub fn contains_step(&self, id: &str) -> bool {
        self.steps.iter().any(|step| step.id == id)
    }

    /// Remove every step with the given id, returning how many were removed
    pub fn remove_step(&mut self, id: &str) -> usize {
        let before = self.steps.len();
        self.steps.retain(|step| step.id != id);
        before - self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_lookup_prefers_first_duplicate() {
        let doc = PipelineDocument::new("p")
            .with_step(Step::new("dup", "input"))
            .with_step(Step::new("dup", "output"));

        assert_eq!(doc.step("dup").map(|s| s.kind.as_str()), Some("input"));
        assert_eq!(doc.step_ids().collect::<Vec<_>>(), vec!["dup", "dup"]);
        assert!(doc.step("missing").is_none());
    }

    #[test]
    fn test_remove_step_drops_all_occurrences() {
        let mut doc = PipelineDocument::new("p")
            .with_step(Step::new("a", "input"))
            .with_step(Step::new("b", "sql"))
            .with_step(Step::new("a", "output"));

        assert_eq!(doc.remove_step("a"), 2);
        assert_eq!(doc.step_ids().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(doc.remove_step("a"), 0);
    }

    #[test]
    fn test_metadata_round_trip() {
        let doc = PipelineDocument::new("orders").with_desc("Nightly orders load");
        let meta = doc.metadata();
        assert_eq!(meta.id.as_deref(), Some("orders"));
        assert_eq!(meta.desc.as_deref(), Some("Nightly orders load"));

        let rebuilt = PipelineDocument::from_parts(meta, Vec::new());
        assert_eq!(rebuilt, doc);
    }
}
