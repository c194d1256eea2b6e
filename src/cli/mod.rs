//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, SessionArgs};

/// Report a failed command on stderr and return the process exit code.
///
/// The whole error chain is printed so an operator sees both the failing
/// step and its root cause.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> i32 {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "chain": chain })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    1
}
