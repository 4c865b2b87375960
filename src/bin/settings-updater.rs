//! Settings Updater Binary
//!
//! Adds settings introduced in a defaults file to a user's settings file.
//! Exit status: 0 when nothing changed, 2 when the file was upgraded, 1 on error.

use clap::Parser;
use settings_updater::cli::{map_error, Cli, RunContext, EXIT_FAILURE};
use settings_updater::config::ConfigLoader;
use settings_updater::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::process;
use tracing::info;

fn main() {
    // clap exits with 2 on bad arguments, which would read as "upgraded"
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if !cli.base_dir.is_dir() {
        eprintln!("Base directory {:?} does not exist", cli.base_dir);
        process::exit(EXIT_FAILURE);
    }

    let mut config = match ConfigLoader::load(&cli.base_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };
    config.logging = build_logging_config(&cli, &config.logging);
    if let Err(errors) = config.validate() {
        eprintln!("Configuration validation failed:\n{}", errors.join("\n"));
        process::exit(EXIT_FAILURE);
    }

    // Initialize logging early
    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    info!("Settings updater starting");

    let context = RunContext::from_cli(&cli, &config);
    match context.execute() {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Build logging configuration from CLI args on top of the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // Keep verbose output visible on the terminal when only a file is configured.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    config.file = Some(resolve_log_file_path(
        cli.log_file.clone(),
        config.file.clone(),
        &cli.base_dir,
    ));

    config
}
