//! CLI parse: clap types for the settings updater. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Settings updater - add new default settings to an existing settings file
#[derive(Parser, Debug)]
#[command(name = "settings-updater")]
#[command(version)]
#[command(about = "Add settings introduced in a defaults file to a user's settings file")]
pub struct Cli {
    /// Base directory; the settings paths and the log file are relative to it
    pub base_dir: PathBuf,

    /// Defaults settings file, relative to the base directory
    pub defaults: PathBuf,

    /// Current settings file, relative to the base directory; rewritten in place
    pub current: PathBuf,

    /// Revert a mapping to its defaults when one of its values differs
    #[arg(long)]
    pub overwrite: bool,

    /// Configuration file path (layered over <BASE_DIR>/settings-updater.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes a file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Defaults file joined onto the base directory.
    pub fn defaults_path(&self) -> PathBuf {
        self.base_dir.join(&self.defaults)
    }

    /// Current settings file joined onto the base directory.
    pub fn current_path(&self) -> PathBuf {
        self.base_dir.join(&self.current)
    }
}
