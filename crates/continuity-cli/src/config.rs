//! Configuration for the continuity CLI.
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file) is valid. Command-line flags override file values.
//!
//! Scoring weights and severity thresholds are NOT configurable here; they
//! are compile-time constants in `continuity-core`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use continuity_core::Severity;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Print per-signal detail in text output
    #[serde(default)]
    pub explain: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Gate mode: exit 2 at or above this severity, 0 below it
    #[serde(default)]
    pub fail_on: Option<Severity>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            explain: false,
            log_level: default_log_level(),
            fail_on: None,
        }
    }
}

impl CliConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Process exit code for a report severity.
    ///
    /// Without `fail_on`: Low 0, Moderate 1, High 2, Critical 3.
    /// With `fail_on`: 2 at or above the threshold, otherwise 0.
    pub fn exit_code(&self, severity: Severity) -> u8 {
        match self.fail_on {
            Some(threshold) if severity >= threshold => 2,
            Some(_) => 0,
            None => match severity {
                Severity::Low => 0,
                Severity::Moderate => 1,
                Severity::High => 2,
                Severity::Critical => 3,
            },
        }
    }
}
