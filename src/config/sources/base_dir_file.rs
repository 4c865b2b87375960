//! Base directory config file source: `<base_dir>/settings-updater.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional config file next to the settings files.
pub const FILE_NAME: &str = "settings-updater.toml";

/// Path to the base directory config file.
pub fn base_dir_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(FILE_NAME)
}

/// Add the base directory config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> ConfigBuilder<DefaultState> {
    let config_path = base_dir_config_path(base_dir);
    if !config_path.is_file() {
        debug!(config_path = %config_path.display(), "No base directory config file");
        return builder;
    }
    builder.add_source(File::from(config_path.as_path()).required(false))
}
