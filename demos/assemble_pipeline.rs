//! Assemble a pipeline from steps, validate it, then swap its steps.
//!
//! Run with: cargo run --example assemble_pipeline

use pipeconf_sdk::{merge, parse, serialize, validate, Step, StepKind};

fn main() -> anyhow::Result<()> {
    let steps = vec![
        Step::of_kind("orders", StepKind::Input)
            .with_format("parquet")
            .with_path("/lake/orders"),
        Step::of_kind("daily", StepKind::Sql)
            .with_source("orders")
            .with_sql("SELECT day, sum(amount) AS total\nFROM orders\nGROUP BY day"),
        Step::of_kind("publish", StepKind::Output)
            .with_source("daily")
            .with_format("delta")
            .with_option("mergeSchema", "true"),
    ];

    let text = serialize(&steps, Some("orders-daily"), Some("Daily order totals"));
    println!("{}\n", text);

    let result = validate(&text);
    println!("valid: {}", result.valid);
    assert_eq!(parse(&text), steps);

    // Drop the sink's format to see the validator complain
    let mut broken = steps.clone();
    broken[2].format = None;
    let merged = merge(&text, &broken);
    let result = validate(&merged);
    println!("after merge: {}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
