//! CLI domain: parse, route, and output only.
//! No merge logic; the run context drives load, merge, and dump.

mod output;
mod parse;
mod route;

pub use output::{map_error, Outcome, EXIT_FAILURE};
pub use parse::Cli;
pub use route::RunContext;
