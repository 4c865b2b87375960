//! Configuration System
//!
//! Layered configuration for the updater: built-in defaults, an optional
//! `settings-updater.toml` in the base directory, an explicit `--config`
//! file, and `SETTINGS_UPDATER__SECTION__KEY` environment overrides.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::ENV_PREFIX;
pub use sources::base_dir_file::FILE_NAME;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Merge behavior
    #[serde(default)]
    pub merge: MergeConfig,

    /// How the upgraded settings file is written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Merge behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Revert a mapping to its defaults when one of its scalars differs
    #[serde(default)]
    pub overwrite: bool,
}

/// Writer options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Start the written document with `---`
    #[serde(default = "default_true")]
    pub explicit_start: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            explicit_start: default_true(),
        }
    }
}

impl UpdaterConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .logging
            .validate()
            .err()
            .into_iter()
            .map(|e| format!("Logging: {}", e))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
