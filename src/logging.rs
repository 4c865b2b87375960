//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides configurable
//! log levels, output formats, and destinations. By default every run logs to the
//! console and to `settings-updater.log` in the base directory.

use crate::error::UpdaterError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Default log file name, created in the base directory.
pub const LOG_FILE_NAME: &str = "settings-updater.log";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable all logging when false
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, both (stdout and file), file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output includes a file); relative paths resolve
    /// against the base directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable log rotation
    #[serde(default = "default_true")]
    pub rotation: bool,

    /// Maximum log file size before rotation (bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Number of rotated log files to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "both".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 // 5 MB
}

fn default_max_files() -> usize {
    5
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            rotation: default_true(),
            max_file_size: default_max_file_size(),
            max_files: default_max_files(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Check level, format and output values without touching the environment.
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!("Invalid log level: {}", self.level));
        }
        check_format(&self.format)?;
        parse_output_destinations(&self.output)?;
        Ok(())
    }
}

/// Resolve the log file path.
///
/// Precedence: explicit CLI path, then the configured path (relative paths
/// resolve against `base_dir`), then `<base_dir>/settings-updater.log`.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    base_dir: &Path,
) -> PathBuf {
    match cli_file.or(config_file) {
        Some(path) if path.is_absolute() => path,
        Some(path) => base_dir.join(path),
        None => base_dir.join(LOG_FILE_NAME),
    }
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (SETTINGS_UPDATER_LOG, SETTINGS_UPDATER_LOG_FORMAT, etc.)
/// 2. CLI arguments and configuration file (already folded into `config`)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), UpdaterError> {
    if config.is_some_and(|c| !c.enabled) {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);
    let json = format == "json";

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if output.stdout {
        layers.push(console_layer(json, use_color, std::io::stdout));
    }
    if output.stderr {
        layers.push(console_layer(json, use_color, std::io::stderr));
    }
    if output.file {
        let file = open_log_file(config)?;
        layers.push(console_layer(json, false, Mutex::new(file)));
    }

    Registry::default()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| UpdaterError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn console_layer<W>(json: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

/// Open the log file for appending, rotating it first if it grew too large.
fn open_log_file(config: Option<&LoggingConfig>) -> Result<fs::File, UpdaterError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    let log_file = config
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            UpdaterError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    if config.rotation {
        rotate_log_file(&log_file, config.max_file_size, config.max_files).map_err(|e| {
            UpdaterError::ConfigError(format!("Failed to rotate log file {:?}: {}", log_file, e))
        })?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            UpdaterError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// `settings-updater.log` -> `settings-updater.log.1`, `.1` -> `.2`, ...
fn rotated_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Shift backups when `path` exceeds `max_size`, keeping at most `max_files`.
pub fn rotate_log_file(path: &Path, max_size: u64, max_files: usize) -> std::io::Result<()> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if size <= max_size {
        return Ok(());
    }
    if max_files == 0 {
        return fs::remove_file(path);
    }

    let oldest = rotated_path(path, max_files);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for index in (1..max_files).rev() {
        let from = rotated_path(path, index);
        if from.exists() {
            fs::rename(&from, rotated_path(path, index + 1))?;
        }
    }
    fs::rename(path, rotated_path(path, 1))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, UpdaterError> {
    // A full directive in SETTINGS_UPDATER_LOG wins over everything else
    if let Ok(filter) = EnvFilter::try_from_env("SETTINGS_UPDATER_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");

    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    // Add module-specific filters
    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(directive.parse().map_err(|e| {
                UpdaterError::ConfigError(format!("Invalid log directive: {}", e))
            })?);
        }
    }

    if let Ok(modules_str) = std::env::var("SETTINGS_UPDATER_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            let parts: Vec<&str> = module_spec.split('=').collect();
            if parts.len() == 2 {
                let directive = format!("{}={}", parts[0].trim(), parts[1].trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    UpdaterError::ConfigError(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

fn check_format(format: &str) -> Result<(), String> {
    if format != "json" && format != "text" {
        return Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ));
    }
    Ok(())
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, UpdaterError> {
    if let Ok(format) = std::env::var("SETTINGS_UPDATER_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    check_format(format).map_err(UpdaterError::ConfigError)?;
    Ok(format.to_string())
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Determine output destinations from config or environment
fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestinations, UpdaterError> {
    if let Ok(output) = std::env::var("SETTINGS_UPDATER_LOG_OUTPUT") {
        return parse_output_destinations(&output).map_err(UpdaterError::ConfigError);
    }

    let output = config.map(|c| c.output.as_str()).unwrap_or("both");
    parse_output_destinations(output).map_err(UpdaterError::ConfigError)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, String> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "both" => (true, false, true),
        "file+stderr" => (false, true, true),
        _ => {
            return Err(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'both', or 'file+stderr')",
                output
            ))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
