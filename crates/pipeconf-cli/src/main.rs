//! pipeconf - validate, format and assemble pipeline configuration documents

use anyhow::Result;
use clap::Parser;
use pipeconf_cli::{run, Args};
use pipeconf_sdk::{PipelineEditorBuilder, SdkConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration; its fallback warning goes to a stderr
    // subscriber until the configured one is installed
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || {
        SdkConfig::load_from(args.config.as_deref())
    })?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let editor = PipelineEditorBuilder::new().with_config(config).build();
    let outcome = run(&editor, args.command)?;

    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize tracing subscriber; library `log` records are captured too
fn init_tracing(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "pipeconf_cli={0},pipeconf_sdk={0},pipeconf_validator={0},pipeconf_parser={0},pipeconf_core={0}",
                    level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
