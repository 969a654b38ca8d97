//! Command-line arguments

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipeconf")]
#[command(version)]
#[command(about = "Validate, format and assemble pipeline configuration documents")]
pub struct Args {
    /// Config file (default: pipeconf.toml / pipeconf.yaml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Check a document and report every problem",
        after_help = "Exits with status 1 when the document has errors.\n\nExample:\n    pipeconf validate pipeline.yaml --json"
    )]
    Validate(ValidateArgs),
    #[command(
        about = "Rewrite a document in canonical layout",
        after_help = "Example:\n    pipeconf fmt pipeline.yaml --write"
    )]
    Fmt(FmtArgs),
    #[command(
        about = "Replace the steps of a document, keeping its id and description",
        after_help = "Example:\n    pipeconf merge pipeline.yaml steps.json"
    )]
    Merge(MergeArgs),
    #[command(
        about = "Serialize a JSON or YAML step list as a document",
        after_help = "Example:\n    pipeconf render steps.json --id orders-daily"
    )]
    Render(RenderArgs),
    #[command(
        about = "Print the parsed document as JSON",
        after_help = "Example:\n    pipeconf export pipeline.yaml"
    )]
    Export(ExportArgs),
}

#[derive(ClapArgs)]
pub struct ValidateArgs {
    /// Document to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs)]
pub struct FmtArgs {
    /// Document to format
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Overwrite the file instead of printing
    #[arg(long)]
    pub write: bool,
}

#[derive(ClapArgs)]
pub struct MergeArgs {
    /// Existing document whose id and description are kept
    #[arg(value_name = "EXISTING")]
    pub existing: PathBuf,

    /// Step list (.json, otherwise YAML)
    #[arg(value_name = "STEPS")]
    pub steps: PathBuf,

    /// Overwrite the existing document instead of printing
    #[arg(long)]
    pub write: bool,
}

#[derive(ClapArgs)]
pub struct RenderArgs {
    /// Step list (.json, otherwise YAML)
    #[arg(value_name = "STEPS")]
    pub steps: PathBuf,

    /// Pipeline id (default: the configured placeholder)
    #[arg(long)]
    pub id: Option<String>,

    /// Pipeline description
    #[arg(long)]
    pub desc: Option<String>,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    /// Document to export
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Include the dependency order of the steps
    #[arg(long)]
    pub with_order: bool,
}
