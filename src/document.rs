//! Settings documents on disk
//!
//! Loads YAML settings files into [`Node`] trees (key order preserved) and
//! writes merged trees back. Comments in the source file are not carried
//! through a load/dump cycle.

use crate::config::OutputConfig;
use crate::error::DocumentError;
use crate::tree::{Node, Scalar};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse a YAML file into a tree.
pub fn load_document(path: &Path) -> Result<Node, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Node::null());
    }
    let value: Value = serde_yaml::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded settings document");
    Ok(Node::from(value))
}

/// Load a settings file that must hold a non-empty mapping.
pub fn load_settings(path: &Path) -> Result<Node, DocumentError> {
    let node = load_document(path)?;
    match &node {
        Node::Mapping(map) if map.is_empty() => Err(DocumentError::Empty(path.to_path_buf())),
        Node::Mapping(_) => Ok(node),
        Node::Scalar(Scalar::Null) => Err(DocumentError::Empty(path.to_path_buf())),
        other => Err(DocumentError::NotAMapping {
            path: path.to_path_buf(),
            found: other.kind(),
        }),
    }
}

/// Render a tree as YAML text.
pub fn render_document(node: &Node, output: &OutputConfig) -> Result<String, DocumentError> {
    let body = serde_yaml::to_string(&Value::from(node.clone()))?;
    if output.explicit_start {
        Ok(format!("---\n{}", body))
    } else {
        Ok(body)
    }
}

/// Write a tree to `path`, replacing the file in one rename.
pub fn dump_document(node: &Node, path: &Path, output: &OutputConfig) -> Result<(), DocumentError> {
    let text = render_document(node, output)?;
    let staging = staging_path(path);
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&staging, text.as_bytes()).map_err(write_err)?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(write_err(e));
    }
    debug!(path = %path.display(), bytes = text.len(), "Wrote settings document");
    Ok(())
}

/// Sibling temp file: `settings.yml` stages as `.settings.yml.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
