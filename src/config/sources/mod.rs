//! Configuration file sources.

pub mod base_dir_file;
pub mod explicit_file;
