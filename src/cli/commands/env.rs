//! Implementation of the `vertex-creds env` command.
//!
//! Prints `export` lines meant for `eval "$(vertex-creds env ...)"`.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SessionArgs;
use crate::domain::models::{Config, CredentialFileDescriptor};

/// Environment a downstream process should export
#[derive(Debug, Serialize)]
pub struct EnvOutput {
    /// `(name, value)` pairs in export order
    pub vars: Vec<(String, String)>,
}

impl From<&CredentialFileDescriptor> for EnvOutput {
    fn from(descriptor: &CredentialFileDescriptor) -> Self {
        Self {
            vars: descriptor
                .env_vars()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

impl CommandOutput for EnvOutput {
    fn to_human(&self) -> String {
        self.vars
            .iter()
            .map(|(name, value)| format!("export {name}={}", shell_quote(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        self.vars
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

/// Single-quote `value` for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Install credentials and print their exports
pub async fn execute(args: SessionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let descriptor = super::run_install(&args, config).await?;
    output(&EnvOutput::from(&descriptor), json_mode);
    Ok(())
}
