//! CLI route: run context. Loads both settings files, merges, and writes back.

use crate::cli::output::Outcome;
use crate::cli::parse::Cli;
use crate::config::{OutputConfig, UpdaterConfig};
use crate::document::{dump_document, load_settings};
use crate::error::UpdaterError;
use crate::merge::{MergeObserver, SettingsMerger, TracingObserver};
use crate::tree::Node;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Runtime context for one updater run: where the files are and how to merge.
#[derive(Debug, Clone)]
pub struct RunContext {
    base_dir: PathBuf,
    defaults_file: PathBuf,
    current_file: PathBuf,
    overwrite: bool,
    output: OutputConfig,
}

impl RunContext {
    /// Create a run context; `defaults_file` and `current_file` are relative
    /// to `base_dir`.
    pub fn new(base_dir: PathBuf, defaults_file: PathBuf, current_file: PathBuf) -> Self {
        Self {
            base_dir,
            defaults_file,
            current_file,
            overwrite: false,
            output: OutputConfig::default(),
        }
    }

    /// Build from parsed arguments and loaded configuration. `--overwrite`
    /// turns overwrite mode on regardless of configuration.
    pub fn from_cli(cli: &Cli, config: &UpdaterConfig) -> Self {
        Self::new(cli.base_dir.clone(), cli.defaults.clone(), cli.current.clone())
            .with_overwrite(cli.overwrite || config.merge.overwrite)
            .with_output(config.output.clone())
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Run with merge events logged through `tracing`.
    pub fn execute(&self) -> Result<Outcome, UpdaterError> {
        self.execute_with(TracingObserver)
    }

    /// Run, reporting merge events to `observer`.
    pub fn execute_with<O: MergeObserver>(&self, observer: O) -> Result<Outcome, UpdaterError> {
        let defaults = self.load(&self.defaults_file)?;
        let current = self.load(&self.current_file)?;

        let outcome = SettingsMerger::new(observer)
            .with_overwrite(self.overwrite)
            .merge(&defaults, &current)
            .map_err(|e| {
                error!(error = %e, "Failed merging '{}'.", self.current_file.display());
                UpdaterError::from(e)
            })?;

        if !outcome.changed {
            info!("There were no settings changes to apply.");
            return Ok(Outcome::Unchanged);
        }

        let target = self.base_dir.join(&self.current_file);
        dump_document(&outcome.merged, &target, &self.output).map_err(|source| {
            error!(error = %source, "Failed dumping updated '{}'.", self.current_file.display());
            UpdaterError::Dump {
                file: self.current_file.display().to_string(),
                source,
            }
        })?;

        info!("Successfully upgraded: '{}'.", self.current_file.display());
        warn!(
            "Comments and anchors in '{}' are not kept when it is rewritten.",
            self.current_file.display()
        );
        Ok(Outcome::Upgraded)
    }

    fn load(&self, file: &Path) -> Result<Node, UpdaterError> {
        load_settings(&self.base_dir.join(file)).map_err(|source| {
            error!(error = %source, "Failed loading '{}'. Aborting...", file.display());
            UpdaterError::Load {
                file: file.display().to_string(),
                source,
            }
        })
    }
}
