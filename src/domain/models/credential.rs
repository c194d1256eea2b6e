//! Credential bundle and the descriptor of an installed credential file.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Env var the Google SDKs read to locate a credential file
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Env var carrying the Vertex AI project for the wrapped CLI
pub const ANTHROPIC_VERTEX_PROJECT_ID: &str = "ANTHROPIC_VERTEX_PROJECT_ID";

/// Env var carrying the Vertex AI region for the wrapped CLI
pub const CLOUD_ML_REGION: &str = "CLOUD_ML_REGION";

/// Env var switching the wrapped CLI into Vertex AI mode
pub const CLAUDE_CODE_USE_VERTEX: &str = "CLAUDE_CODE_USE_VERTEX";

/// Short-lived credential material fetched for one session.
///
/// The serialized key is held as a [`SecretString`]: it is zeroized on drop
/// and redacted from `Debug` output.
#[derive(Debug)]
pub struct CredentialBundle {
    /// Serialized secret material (a service-account key JSON), written verbatim
    pub credentials: SecretString,

    /// Target cloud project
    pub project_id: String,

    /// Target cloud region
    pub region: String,
}

impl CredentialBundle {
    /// Create a bundle from raw values.
    pub fn new(
        credentials: impl Into<String>,
        project_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            credentials: SecretString::from(credentials.into()),
            project_id: project_id.into(),
            region: region.into(),
        }
    }

    /// The first empty field in document order (`credentials`, `projectId`, `region`).
    pub fn first_missing_field(&self) -> Option<&'static str> {
        if self.credentials.expose_secret().is_empty() {
            Some("credentials")
        } else if self.project_id.is_empty() {
            Some("projectId")
        } else if self.region.is_empty() {
            Some("region")
        } else {
            None
        }
    }
}

/// Where an install put the credentials, and what they are for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialFileDescriptor {
    /// Absolute path of the owner-read-only credential file
    pub credentials_path: PathBuf,

    /// Target cloud project
    pub project_id: String,

    /// Target cloud region
    pub region: String,
}

impl CredentialFileDescriptor {
    /// Environment a downstream process needs to pick up these credentials.
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                GOOGLE_APPLICATION_CREDENTIALS,
                self.credentials_path.display().to_string(),
            ),
            (ANTHROPIC_VERTEX_PROJECT_ID, self.project_id.clone()),
            (CLOUD_ML_REGION, self.region.clone()),
            (CLAUDE_CODE_USE_VERTEX, "1".to_string()),
        ]
    }
}
