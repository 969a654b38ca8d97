//! Command implementations
//!
//! Each command reads its inputs, runs one editor operation and returns
//! what to print; `main` owns stdout and the exit status.

use crate::cli::{Command, ExportArgs, FmtArgs, MergeArgs, RenderArgs, ValidateArgs};
use anyhow::{Context, Result};
use pipeconf_sdk::{DiagnosticSeverity, PipelineEditor, StepListFormat, ValidationResult};
use serde_json::json;
use std::fs;
use std::path::Path;

/// What a command produced
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }
}

pub fn run(editor: &PipelineEditor, command: Command) -> Result<Outcome> {
    match command {
        Command::Validate(args) => validate(editor, args),
        Command::Fmt(args) => fmt(editor, args),
        Command::Merge(args) => merge(editor, args),
        Command::Render(args) => render(editor, args),
        Command::Export(args) => export(editor, args),
    }
}

fn validate(editor: &PipelineEditor, args: ValidateArgs) -> Result<Outcome> {
    let text = read(&args.file)?;
    let result = editor.validate(&text);
    tracing::info!(
        "validated {}: {} errors, {} warnings",
        args.file.display(),
        result.errors.len(),
        result.warnings.len()
    );

    let output = if args.json {
        serde_json::to_string_pretty(&result)?
    } else {
        describe(&args.file, &result)
    };

    Ok(Outcome {
        output,
        success: result.valid,
    })
}

fn describe(file: &Path, result: &ValidationResult) -> String {
    let mut lines: Vec<String> = result
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let severity = match diagnostic.severity {
                DiagnosticSeverity::Error => "error",
                DiagnosticSeverity::Warning => "warning",
            };
            match diagnostic.line {
                Some(line) => format!(
                    "{}[{}] {}:{}: {}",
                    severity,
                    diagnostic.code,
                    file.display(),
                    line,
                    diagnostic.message
                ),
                None => format!(
                    "{}[{}] {}: {}",
                    severity,
                    diagnostic.code,
                    file.display(),
                    diagnostic.message
                ),
            }
        })
        .collect();

    lines.push(if result.valid {
        format!("{}: valid", file.display())
    } else {
        format!("{}: {} error(s)", file.display(), result.errors.len())
    });
    lines.join("\n")
}

fn fmt(editor: &PipelineEditor, args: FmtArgs) -> Result<Outcome> {
    let formatted = editor.format(&read(&args.file)?);
    if args.write {
        write(&args.file, &formatted)?;
        return Ok(Outcome::ok(format!("Wrote {}", args.file.display())));
    }
    Ok(Outcome::ok(formatted))
}

fn merge(editor: &PipelineEditor, args: MergeArgs) -> Result<Outcome> {
    let existing = read(&args.existing)?;
    let steps = read(&args.steps)?;
    let merged = editor
        .merge_step_list(&existing, &steps, StepListFormat::from_path(&args.steps))
        .with_context(|| format!("Invalid step list {}", args.steps.display()))?;

    if args.write {
        write(&args.existing, &merged)?;
        return Ok(Outcome::ok(format!("Wrote {}", args.existing.display())));
    }
    Ok(Outcome::ok(merged))
}

fn render(editor: &PipelineEditor, args: RenderArgs) -> Result<Outcome> {
    let steps = read(&args.steps)?;
    let rendered = editor
        .render_step_list(
            &steps,
            StepListFormat::from_path(&args.steps),
            args.id.as_deref(),
            args.desc.as_deref(),
        )
        .with_context(|| format!("Invalid step list {}", args.steps.display()))?;
    Ok(Outcome::ok(rendered))
}

fn export(editor: &PipelineEditor, args: ExportArgs) -> Result<Outcome> {
    let text = read(&args.file)?;
    let parsed = editor.parse_document(&text);
    for issue in &parsed.issues {
        tracing::warn!("{}: skipped {}", args.file.display(), issue);
    }

    let mut value = serde_json::to_value(&parsed.document)?;
    if args.with_order {
        // Cyclic graphs export a null order
        let order = match parsed.document.execution_order() {
            Ok(order) => json!(order),
            Err(e) => {
                tracing::warn!("{}: {}", args.file.display(), e);
                serde_json::Value::Null
            }
        };
        value["executionOrder"] = order;
    }

    Ok(Outcome::ok(serde_json::to_string_pretty(&value)?))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write(path: &Path, text: &str) -> Result<()> {
    fs::write(path, format!("{}\n", text))
        .with_context(|| format!("Failed to write {}", path.display()))
}
