//! Settings Updater: bring a user's settings file up to date with its defaults
//!
//! Merges a defaults settings tree into a current settings tree, adding keys
//! and sequence entries the user is missing while keeping every value they
//! already set, and reports whether the file needs to be rewritten.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod filters;
pub mod logging;
pub mod merge;
pub mod tree;
