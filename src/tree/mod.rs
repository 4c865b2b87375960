//! Settings Tree
//!
//! In-memory form of a settings document: a closed `Node` type over ordered
//! mappings, sequences and scalar leaves, plus key paths for addressing nodes.

pub mod node;
pub mod path;

pub use node::{Mapping, Node, Scalar};
pub use path::KeyPath;
