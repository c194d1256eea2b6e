//! Configuration model.

use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::identity::ConnectionIdentity;

/// Main configuration structure for vertex-creds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Session backend client configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Installed credential file configuration
    #[serde(default)]
    pub credentials: CredentialFileConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session backend client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Explicit backend base URL; derived from the connection URL when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_token_env() -> String {
    "BOT_TOKEN".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Installed credential file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CredentialFileConfig {
    /// Well-known credential file path
    #[serde(default = "default_credentials_path")]
    pub path: PathBuf,

    /// Suffix the file name with the session id so concurrent sessions
    /// on one host never share a file
    #[serde(default)]
    pub per_session_path: bool,

    /// Require the payload to be a Google service-account key
    #[serde(default)]
    pub validate_service_account_key: bool,
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("/tmp/vertex-credentials.json")
}

impl Default for CredentialFileConfig {
    fn default() -> Self {
        Self {
            path: default_credentials_path(),
            per_session_path: false,
            validate_service_account_key: false,
        }
    }
}

impl CredentialFileConfig {
    /// Path the credentials for `identity` are written to.
    ///
    /// With `per_session_path`, `/tmp/vertex-credentials.json` becomes
    /// `/tmp/vertex-credentials-{session}.json`.
    pub fn target_path(&self, identity: &ConnectionIdentity) -> PathBuf {
        if !self.per_session_path {
            return self.path.clone();
        }

        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "vertex-credentials".into(), |s| s.to_string_lossy());
        let session = sanitize_file_component(&identity.session_id);
        let file_name = match self.path.extension() {
            Some(ext) => format!("{stem}-{session}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{session}"),
        };

        self.path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name)
    }
}

/// Bytes kept as-is in a per-session file name; everything else, `%`
/// included, is percent-escaped so distinct sessions never share a name.
const FILE_COMPONENT_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

fn sanitize_file_component(value: &str) -> String {
    utf8_percent_encode(value, FILE_COMPONENT_ESCAPES).to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stderr
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable
    #[default]
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file each day
    #[default]
    Daily,
    /// New file each hour
    Hourly,
    /// Single file
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
