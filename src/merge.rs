//! Settings Merge
//!
//! Reconciles a defaults tree against a current tree. Keys the defaults have
//! and the current tree lacks are added, sequences gain missing elements, and
//! everything the user already set is kept. The result is a new tree plus a
//! flag telling the caller whether anything changed and the file needs to be
//! written back.
//!
//! Observability goes through an injected [`MergeObserver`]; the merge itself
//! performs no I/O.

use crate::error::MergeError;
use crate::tree::{KeyPath, Mapping, Node};
use tracing::info;

/// Something the merge did to the current tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeEvent {
    /// A mapping key missing from the current tree was copied from defaults.
    KeyAdded {
        parent: KeyPath,
        key: Node,
        value: Node,
    },
    /// A sequence element missing from the current tree was appended.
    ItemAppended { key: KeyPath, value: Node },
}

/// Receives merge events as they happen.
pub trait MergeObserver {
    fn observe(&mut self, event: &MergeEvent);
}

/// Logs every event at INFO through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn observe(&mut self, event: &MergeEvent) {
        match event {
            MergeEvent::KeyAdded { parent, key, value } if parent.is_root() => {
                info!(key = %key, "Added '{}' setting: {}", key, value);
            }
            MergeEvent::KeyAdded { parent, key, value } => {
                info!(
                    parent = %parent,
                    key = %key,
                    "Added '{}' to setting '{}': {}",
                    key,
                    parent,
                    value
                );
            }
            MergeEvent::ItemAppended { key, value } => {
                info!(key = %key, "Added to setting '{}': {}", key, value);
            }
        }
    }
}

/// Collects events in order.
impl MergeObserver for Vec<MergeEvent> {
    fn observe(&mut self, event: &MergeEvent) {
        self.push(event.clone());
    }
}

impl<O: MergeObserver + ?Sized> MergeObserver for &mut O {
    fn observe(&mut self, event: &MergeEvent) {
        (**self).observe(event);
    }
}

/// Discards events.
impl MergeObserver for () {
    fn observe(&mut self, _event: &MergeEvent) {}
}

/// Result of a merge: the new tree and whether it differs from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub merged: Node,
    pub changed: bool,
}

impl MergeOutcome {
    pub fn into_parts(self) -> (Node, bool) {
        (self.merged, self.changed)
    }
}

/// Merges a defaults tree into a current tree.
pub struct SettingsMerger<O: MergeObserver> {
    observer: O,
    overwrite: bool,
}

impl<O: MergeObserver> SettingsMerger<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            overwrite: false,
        }
    }

    /// In overwrite mode a scalar that differs from its default reverts the
    /// whole enclosing mapping to the defaults' version of it.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Merge `defaults` into `current`. Neither input is modified.
    pub fn merge(&mut self, defaults: &Node, current: &Node) -> Result<MergeOutcome, MergeError> {
        let (merged, changed) = self.merge_node(defaults, current, None)?;
        Ok(MergeOutcome { merged, changed })
    }

    /// `path` is `None` only for the document root.
    fn merge_node(
        &mut self,
        defaults: &Node,
        current: &Node,
        path: Option<&KeyPath>,
    ) -> Result<(Node, bool), MergeError> {
        match defaults {
            Node::Mapping(defaults_map) => {
                let Node::Mapping(current_map) = current else {
                    return Err(shape_mismatch(path, defaults, current));
                };
                self.merge_mapping(defaults_map, current_map, path)
            }
            Node::Sequence(defaults_items) if path.is_some() => {
                let Node::Sequence(current_items) = current else {
                    return Err(shape_mismatch(path, defaults, current));
                };
                let key = path.cloned().unwrap_or_default();
                Ok(self.merge_sequence(defaults_items, current_items, key))
            }
            Node::Sequence(_) | Node::Scalar(_) => Ok((current.clone(), false)),
        }
    }

    fn merge_mapping(
        &mut self,
        defaults: &Mapping,
        current: &Mapping,
        path: Option<&KeyPath>,
    ) -> Result<(Node, bool), MergeError> {
        let here = path.cloned().unwrap_or_default();
        let mut merged = current.clone();
        let mut changed = false;

        for (key, value) in defaults.iter() {
            let Some(existing) = current.get(key) else {
                merged.insert(key.clone(), value.clone());
                changed = true;
                self.observer.observe(&MergeEvent::KeyAdded {
                    parent: here.clone(),
                    key: key.clone(),
                    value: value.clone(),
                });
                continue;
            };

            if value.is_container() {
                let child = here.child(key);
                let (sub, sub_changed) = self.merge_node(value, existing, Some(&child))?;
                merged.insert(key.clone(), sub);
                changed |= sub_changed;
            } else if value != existing && self.overwrite {
                // Whole-mapping reversion: siblings merged so far are discarded,
                // later keys keep merging into the defaults' copy.
                merged = defaults.clone();
                changed = true;
            }
        }

        Ok((Node::Mapping(merged), changed))
    }

    fn merge_sequence(&mut self, defaults: &[Node], current: &[Node], key: KeyPath) -> (Node, bool) {
        let mut merged = current.to_vec();
        let mut changed = false;

        for item in defaults {
            if current.contains(item) {
                continue;
            }
            merged.push(item.clone());
            changed = true;
            self.observer.observe(&MergeEvent::ItemAppended {
                key: key.clone(),
                value: item.clone(),
            });
        }

        (Node::Sequence(merged), changed)
    }
}

fn shape_mismatch(path: Option<&KeyPath>, defaults: &Node, current: &Node) -> MergeError {
    MergeError::ShapeMismatch {
        path: path.cloned().unwrap_or_default(),
        expected: defaults.kind(),
        found: current.kind(),
    }
}

/// Merge `defaults` into `current`, logging additions through `tracing`.
pub fn merge(defaults: &Node, current: &Node, overwrite: bool) -> Result<MergeOutcome, MergeError> {
    SettingsMerger::new(TracingObserver)
        .with_overwrite(overwrite)
        .merge(defaults, current)
}
