//! Step-level semantic checks
//!
//! Implements E003-E008 and W001-W002. Every check runs against the full
//! step list, so a step may reference one declared after it.

use crate::diagnostic::Diagnostic;
use pipeconf_core::ast::{PipelineDocument, Step};
use pipeconf_core::CoreError;
use std::collections::HashSet;

/// Run all step checks.
///
/// `lines` holds the 1-based line of each step, parallel to `steps`; it
/// may be empty when the steps did not come from text.
pub(crate) fn analyze_steps(steps: &[Step], lines: &[usize]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // E003: at least one step
    if steps.is_empty() {
        diagnostics.push(Diagnostic::error("E003", "Pipeline must have at least one step"));
        return diagnostics;
    }

    // E004: step ids must be unique
    let mut seen = HashSet::new();
    for (index, step) in steps.iter().enumerate() {
        if !seen.insert(step.id.as_str()) {
            diagnostics.push(
                Diagnostic::error("E004", format!("Duplicate step ID: '{}'", step.id))
                    .with_step(&step.id)
                    .with_line(lines.get(index).copied()),
            );
        }
    }

    for (index, step) in steps.iter().enumerate() {
        check_step(step, &seen, lines.get(index).copied(), &mut diagnostics);
    }

    check_cycles(steps, &mut diagnostics);

    diagnostics
}

fn check_step(step: &Step, ids: &HashSet<&str>, line: Option<usize>, diagnostics: &mut Vec<Diagnostic>) {
    let located = |diagnostic: Diagnostic| diagnostic.with_step(&step.id).with_line(line);

    match step.step_kind() {
        // E005: kind must be one of the known kinds
        None => diagnostics.push(located(Diagnostic::error(
            "E005",
            format!("Invalid step kind '{}' in step '{}'", step.kind, step.id),
        ))),
        // E006: input/output steps should name their format
        Some(kind) if kind.requires_format() && is_blank(step.format.as_deref()) => {
            diagnostics.push(located(Diagnostic::error(
                "E006",
                format!(
                    "Step '{}' of kind '{}' should specify a 'format'",
                    step.id, step.kind
                ),
            )))
        }
        Some(_) => {}
    }

    // E007: source must name an existing step
    if let Some(source) = step.source.as_deref().map(str::trim) {
        if !source.is_empty() && !ids.contains(source) {
            diagnostics.push(located(Diagnostic::error(
                "E007",
                format!("Step '{}' references unknown source '{}'", step.id, source),
            )));
        }
    }

    // E008: every dependsOn entry must name an existing step
    for dependency in &step.depends_on {
        if !ids.contains(dependency.as_str()) {
            diagnostics.push(located(Diagnostic::error(
                "E008",
                format!("Step '{}' depends on unknown step '{}'", step.id, dependency),
            )));
        }
    }

    // W002: a step feeding itself
    if step.upstream().any(|upstream| upstream.trim() == step.id) {
        diagnostics.push(located(Diagnostic::warning(
            "W002",
            format!("Step '{}' references itself", step.id),
        )));
    }
}

/// W001: cycles through source/dependsOn edges. Self references are
/// left to W002.
fn check_cycles(steps: &[Step], diagnostics: &mut Vec<Diagnostic>) {
    let graph = PipelineDocument {
        id: None,
        desc: None,
        steps: steps.iter().map(without_self_references).collect(),
    };

    if let Err(CoreError::Cycle(members)) = graph.execution_order() {
        log::debug!("dependency cycle among {:?}", members);
        diagnostics.push(Diagnostic::warning(
            "W001",
            format!(
                "Dependency cycle between steps: {}",
                members
                    .iter()
                    .map(|id| format!("'{}'", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }
}

fn without_self_references(step: &Step) -> Step {
    let mut step = step.clone();
    if step.source.as_deref() == Some(step.id.as_str()) {
        step.source = None;
    }
    let id = step.id.clone();
    step.depends_on.retain(|dependency| *dependency != id);
    step
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}
