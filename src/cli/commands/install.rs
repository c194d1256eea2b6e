//! Implementation of the `vertex-creds install` command.

use anyhow::Result;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SessionArgs;
use crate::domain::models::{Config, CredentialFileDescriptor};

impl CommandOutput for CredentialFileDescriptor {
    fn to_human(&self) -> String {
        format!(
            "Vertex AI credentials installed\n  path:    {}\n  project: {}\n  region:  {}",
            self.credentials_path.display(),
            self.project_id,
            self.region
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Install credentials and print where they went
pub async fn execute(args: SessionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let descriptor = super::run_install(&args, config).await?;
    output(&descriptor, json_mode);
    Ok(())
}
