//! Shared test utilities for integration tests
//!
//! Builds a throwaway base directory holding a defaults file and a current
//! settings file, and runs the binary against it with a clean environment.

use settings_updater::tree::Node;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const DEFAULTS: &str = "settings.yml.default";
pub const CURRENT: &str = "settings.yml";

/// Environment variables that would change how the binary behaves.
const ISOLATED_VARS: &[&str] = &[
    "SETTINGS_UPDATER_LOG",
    "SETTINGS_UPDATER_LOG_FORMAT",
    "SETTINGS_UPDATER_LOG_OUTPUT",
    "SETTINGS_UPDATER_LOG_MODULES",
    "SETTINGS_UPDATER__MERGE__OVERWRITE",
    "SETTINGS_UPDATER__OUTPUT__EXPLICIT_START",
];

/// Parse YAML text into a tree.
pub fn yaml(src: &str) -> Node {
    Node::from(serde_yaml::from_str::<serde_yaml::Value>(src).unwrap())
}

/// Base directory with both settings files written.
pub struct Playbook {
    pub dir: TempDir,
}

impl Playbook {
    pub fn new(defaults: &str, current: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULTS), defaults).unwrap();
        fs::write(dir.path().join(CURRENT), current).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn current_path(&self) -> PathBuf {
        self.path().join(CURRENT)
    }

    pub fn read_current(&self) -> String {
        fs::read_to_string(self.current_path()).unwrap()
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("settings-updater.log")
    }

    /// Run the binary with `flags` followed by the three positional arguments.
    pub fn run(&self, flags: &[&str]) -> Output {
        let mut cmd = updater_command();
        cmd.args(flags).arg(self.path()).arg(DEFAULTS).arg(CURRENT);
        cmd.output().unwrap()
    }
}

/// Binary command with the updater's environment variables cleared.
pub fn updater_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_settings-updater"));
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}
