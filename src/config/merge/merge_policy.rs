//! Merge rules: defaults, override order, conflict handling.
//!
//! Layers, lowest precedence first: built-in defaults, the base directory
//! file, an explicit `--config` file, then `SETTINGS_UPDATER__*` environment
//! variables. CLI flags are applied by the binary after loading.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for environment overrides, e.g. `SETTINGS_UPDATER__MERGE__OVERWRITE`.
pub const ENV_PREFIX: &str = "SETTINGS_UPDATER";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("merge.overwrite", false)?
        .set_default("output.explicit_start", true)
}

/// Add the environment layer on top of everything already in the builder.
pub fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
