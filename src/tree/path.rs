//! Key paths: the chain of mapping keys leading from the root to a node

use super::Node;
use std::fmt;

/// Location of a node inside a settings tree.
///
/// The root path is empty and renders as `top-level`; other paths render as
/// dot-joined keys (`core.paths`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path one level deeper, through `key`.
    pub fn child(&self, key: &Node) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "top-level")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
