//! CLI output: error mapping and the process exit-code contract.

use crate::error::UpdaterError;

/// Exit status for any fatal error: bad arguments, unreadable input,
/// merge failure, or a failed write.
pub const EXIT_FAILURE: i32 = 1;

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Current settings already had everything; nothing written.
    Unchanged,
    /// Settings were upgraded and written back.
    Upgraded,
}

impl Outcome {
    /// 0 when nothing changed, 2 when the upgraded file was written.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Unchanged => 0,
            Outcome::Upgraded => 2,
        }
    }
}

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &UpdaterError) -> String {
    e.to_string()
}
