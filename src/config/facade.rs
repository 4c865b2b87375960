//! Config loading entry point.

use super::merge::merge_policy;
use super::sources::{base_dir_file, explicit_file};
use super::UpdaterConfig;
use crate::error::UpdaterError;
use std::path::Path;
use tracing::debug;

/// Builds an [`UpdaterConfig`] from all configuration layers.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run rooted at `base_dir`.
    ///
    /// `explicit` names a file passed with `--config`; it must exist and
    /// takes precedence over the base directory file.
    pub fn load(base_dir: &Path, explicit: Option<&Path>) -> Result<UpdaterConfig, UpdaterError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = base_dir_file::add_to_builder(builder, base_dir);
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path);
        }
        builder = merge_policy::with_environment(builder);

        let config: UpdaterConfig = builder.build()?.try_deserialize()?;
        debug!(
            base_dir = %base_dir.display(),
            overwrite = config.merge.overwrite,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file plus defaults and environment.
    pub fn load_from_file(path: &Path) -> Result<UpdaterConfig, UpdaterError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, path);
        let config = merge_policy::with_environment(builder)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
