//! Domain errors for credential provisioning.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single credential fetch did not produce a usable bundle.
///
/// A fetch never panics and never hands out a partial bundle: every failure
/// below the installer collapses into one of these values.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The bearer token env var is unset or blank
    #[error("Bearer token environment variable {0} is not set")]
    MissingToken(String),

    /// No usable project/session could be derived
    #[error("Cannot resolve session identity: {0}")]
    IdentityUnresolved(String),

    /// Connect error or timeout
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Backend returned HTTP {status}: {body}")]
    BackendStatus {
        /// HTTP status code
        status: u16,
        /// Scrubbed, truncated response body
        body: String,
    },

    /// Body is not the expected JSON object
    #[error("Backend response is not a credential object: {0}")]
    MalformedResponse(String),

    /// A required field is missing or empty
    #[error("Backend response is missing required field `{0}`")]
    IncompleteResponse(&'static str),
}

impl FetchError {
    /// Whether the backend itself failed (unreachable, timed out, or non-2xx).
    ///
    /// A 404 ("not configured") counts like any other status.
    pub const fn is_backend_error(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::BackendStatus { .. })
    }
}

/// Structural problems with a service-account key payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyValidationError {
    /// Payload does not parse as JSON
    #[error("key is not valid JSON: {0}")]
    NotJson(String),

    /// Payload is JSON but not an object
    #[error("key is not a JSON object")]
    NotAnObject,

    /// A required key field is absent
    #[error("key is missing required field '{0}'")]
    MissingField(&'static str),

    /// `type` is not `service_account`
    #[error("key type is '{0}', expected 'service_account'")]
    WrongType(String),
}

/// Errors raised to the caller by the credential installer.
///
/// Each variant maps to exactly one step of the install sequence so an
/// operator can tell where it stopped.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The fetch step failed
    #[error("Failed to fetch Vertex AI credentials")]
    FetchFailed(#[from] FetchError),

    /// Bundle has no credentials
    #[error("Backend returned empty credentials")]
    EmptyCredentials,

    /// Bundle has no project id
    #[error("Backend returned empty project_id")]
    EmptyProjectId,

    /// Bundle has no region
    #[error("Backend returned empty region")]
    EmptyRegion,

    /// Key shape check failed
    #[error("Backend credentials are not a valid service account key")]
    InvalidServiceAccountKey(#[from] KeyValidationError),

    /// Writing the credential file failed
    #[error("Failed to write Vertex credentials to temp file {}: {error}", path.display())]
    WriteFailed {
        /// Target credential file
        path: PathBuf,
        /// Underlying write, chmod or rename error
        error: std::io::Error,
    },
}

/// Result alias for install operations.
pub type InstallResult<T> = Result<T, InstallError>;
