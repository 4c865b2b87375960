//! Error types for the settings updater.

use crate::tree::KeyPath;
use std::path::PathBuf;
use thiserror::Error;

/// Merge-related errors
#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    #[error("Shape mismatch at {path}: defaults has a {expected}, current has a {found}")]
    ShapeMismatch {
        path: KeyPath,
        expected: &'static str,
        found: &'static str,
    },
}

/// Settings document load/dump errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Document {0:?} is empty")]
    Empty(PathBuf),

    #[error("Document {path:?} must be a mapping at the top level, found a {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors surfaced by the updater run
#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("Failed loading '{file}': {source}")]
    Load {
        file: String,
        #[source]
        source: DocumentError,
    },

    #[error("Failed dumping updated '{file}': {source}")]
    Dump {
        file: String,
        #[source]
        source: DocumentError,
    },

    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for UpdaterError {
    fn from(err: config::ConfigError) -> Self {
        UpdaterError::ConfigError(err.to_string())
    }
}
