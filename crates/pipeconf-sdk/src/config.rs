//! SDK configuration

use crate::error::{Result, SdkError};
use pipeconf_parser::EmitterOptions;
use pipeconf_validator::ValidatorOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up as `pipeconf.toml`, `pipeconf.yaml`, ...
pub const DEFAULT_CONFIG_NAME: &str = "pipeconf";

/// Prefix of the environment variables that override the config file
pub const ENV_PREFIX: &str = "PIPECONF";

/// SDK configuration
///
/// Nested keys are reached from the environment with a double underscore,
/// e.g. `PIPECONF_EMITTER__INDENT=4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Serializer layout
    pub emitter: EmitterOptions,

    /// Validator reporting
    pub validator: ValidatorOptions,

    /// Log level used by the command-line tool when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            emitter: EmitterOptions::default(),
            validator: ValidatorOptions::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl SdkConfig {
    /// Load configuration from `pipeconf.*` in the working directory and
    /// `PIPECONF_*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required when given) or
    /// the default `pipeconf.*` file, then environment variables
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config_result = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build();

        let config: Self = match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| SdkError::ConfigError(format!("Failed to deserialize config: {}", e)))?,
            Err(e) if path.is_some() => {
                return Err(SdkError::ConfigError(format!("Failed to read config: {}", e)));
            }
            Err(e) => {
                tracing::warn!("Unreadable config ({}), using default configuration", e);
                Self::default()
            }
        };

        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(1..=9).contains(&self.emitter.indent) {
            return Err(SdkError::ConfigError(format!(
                "emitter.indent must be between 1 and 9, got {}",
                self.emitter.indent
            )));
        }
        if self.emitter.placeholder_id.trim().is_empty() {
            return Err(SdkError::ConfigError(
                "emitter.placeholder_id must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
