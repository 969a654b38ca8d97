//! Unit tests for the document parser and serializer
//!
//! Exercises the text format end to end: round-trips through the
//! serializer, tolerance of hand-written documents and metadata lookup.

use pipeconf_core::ast::{PipelineDocument, Position, Step};
use pipeconf_parser::*;
use pretty_assertions::assert_eq;

fn sample_steps() -> Vec<Step> {
    vec![
        Step::new("orders", "input")
            .with_short_desc("Raw orders")
            .with_format("parquet")
            .with_path("s3://lake/orders: 2024")
            .with_option("mergeSchema", "true")
            .with_option("basePath", "s3://lake")
            .with_position(40.0, 80.5),
        Step::new("customers", "input")
            .with_format("csv")
            .with_path("/data/customers.csv")
            .with_option("header", "true")
            .with_cache(true),
        Step::new("joined", "sql")
            .with_source("orders")
            .depends_on("customers")
            .with_sql("SELECT o.*, c.region\nFROM orders o\n  JOIN customers c ON o.cid = c.id")
            .with_show(false)
            .with_desc("Orders enriched with\ncustomer regions"),
        Step::new("out", "output")
            .with_source("joined")
            .with_format("delta")
            .with_path("/warehouse/orders")
            .with_schema("id BIGINT, region STRING"),
    ]
}

// =============================================================================
// Round-trip
// =============================================================================

#[test]
fn test_round_trip_preserves_steps() {
    let steps = sample_steps();
    let text = serialize(&steps, Some("orders-daily"), Some("Daily orders rollup"));

    let parsed = PipelineParser::parse(&text);
    assert!(parsed.issues.is_empty(), "issues: {:?}", parsed.issues);
    assert_eq!(parsed.steps(), steps.as_slice());
    assert_eq!(parsed.document.id.as_deref(), Some("orders-daily"));
    assert_eq!(parsed.document.desc.as_deref(), Some("Daily orders rollup"));
}

#[test]
fn test_reserialization_is_idempotent() {
    let first = serialize(&sample_steps(), Some("p"), None);
    let second = serialize(&parse_steps(&first), Some("p"), None);
    assert_eq!(first, second);
}

#[test]
fn test_multi_line_sql_round_trip() {
    let step = Step::new("q", "sql").with_sql("SELECT *\nFROM t\nWHERE x = 1");
    let text = serialize(&[step], Some("p"), None);

    assert!(text.contains("sql: |\n"), "{}", text);
    let steps = parse_steps(&text);
    assert_eq!(steps[0].sql.as_deref(), Some("SELECT *\nFROM t\nWHERE x = 1"));
}

#[test]
fn test_awkward_scalars_round_trip() {
    let steps = vec![Step::new("odd", "sql")
        .with_short_desc("  padded  ")
        .with_sql("| starts with a pipe")
        .with_schema("'quoted'")
        .with_path("")
        .with_option("sep", "")
        .with_option("quote", "\"")
        .with_desc("\n  first line indented\nsecond")];

    let text = serialize(&steps, Some("p"), None);
    assert_eq!(parse_steps(&text), steps);
}

#[test]
fn test_awkward_keys_and_dependencies_round_trip() {
    let steps = vec![
        Step::new("'a'", "sql")
            .with_option("#hash", "1")
            .with_option("\"q\"", "2")
            .with_option("k: v", "3")
            .with_option("- dash", "4")
            .with_option("multi\nline\\", "5"),
        Step::new("b", "sql")
            .depends_on("stage:")
            .depends_on("'a'")
            .depends_on("x: y")
            .depends_on("#tag")
            .depends_on("-"),
    ];

    let text = serialize(&steps, Some("p"), None);
    let parsed = PipelineParser::parse(&text);
    assert!(parsed.issues.is_empty(), "issues: {:?}", parsed.issues);
    assert_eq!(parsed.steps(), steps.as_slice());
}

#[test]
fn test_document_round_trip_with_multi_line_description() {
    let doc = PipelineDocument::new("p")
        .with_desc("Line one\nLine two")
        .with_step(Step::new("a", "input").with_position(-1.25, 3.0));

    let text = Emitter::new().emit_document(&doc);
    let parsed = PipelineParser::parse(&text).into_document();
    assert_eq!(parsed, doc);
    assert_eq!(parsed.steps[0].position, Some(Position::new(-1.25, 3.0)));
}

#[test]
fn test_round_trip_with_custom_indent() {
    let emitter = Emitter::with_options(EmitterOptions {
        indent: 4,
        ..EmitterOptions::default()
    });
    let steps = sample_steps();
    let text = emitter.emit(&steps, Some("p"), None);
    assert_eq!(parse_steps(&text), steps);
}

// =============================================================================
// Hand-written documents
// =============================================================================

#[test]
fn test_parse_hand_written_document() {
    let text = r#"
# Nightly sales job
id: "sales-nightly"

steps:
- id: raw
  kind: input
  format: 'json'
  path: /landing/sales
  options:
    multiLine: "true"

- id: parsed
  kind: parse-json
  source: raw
  schema: |-
    order_id STRING,
    amount DOUBLE
  dependsOn: [raw]

- id: sink
  kind: output
  source: parsed
  format: delta
  unknownAttribute: ignored
"#;

    let parsed = PipelineParser::parse(text);
    assert!(parsed.issues.is_empty(), "issues: {:?}", parsed.issues);
    assert_eq!(parsed.document.id.as_deref(), Some("sales-nightly"));

    let steps = parsed.steps();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].format.as_deref(), Some("json"));
    assert_eq!(steps[0].options.get("multiLine").map(String::as_str), Some("true"));
    assert_eq!(steps[1].schema.as_deref(), Some("order_id STRING,\namount DOUBLE"));
    assert_eq!(steps[1].depends_on, vec!["raw"]);
    assert_eq!(steps[2].source.as_deref(), Some("parsed"));
}

#[test]
fn test_whole_document_indented() {
    let text = "    id: p\n    steps:\n      - id: a\n        kind: input\n";
    let parsed = PipelineParser::parse(text);
    assert_eq!(parsed.document.id.as_deref(), Some("p"));
    assert_eq!(parsed.steps(), &[Step::new("a", "input")]);
}

#[test]
fn test_duplicate_steps_are_all_kept() {
    let text = "id: p\nsteps:\n  - id: a\n    kind: input\n  - id: a\n    kind: output\n";
    let steps = parse_steps(text);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].kind, "output");
}

#[test]
fn test_empty_and_missing_steps() {
    assert!(parse_steps("").is_empty());
    assert!(parse_steps("id: p\n").is_empty());
    assert!(parse_steps("id: p\nsteps: none\n").is_empty());
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_extract_metadata_ignores_step_ids() {
    let meta = extract_metadata("steps:\n  - id: a\n    kind: input\nid: late-id\n");
    assert_eq!(meta.id.as_deref(), Some("late-id"));
    assert_eq!(meta.desc, None);
}

#[test]
fn test_extract_metadata_block_description() {
    let meta = extract_metadata("id: p\ndesc: |\n  first\n  second\nsteps:\n");
    assert_eq!(meta.desc.as_deref(), Some("first\nsecond"));
}
