//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test doubles used across
//! multiple integration test files.

#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use vertex_creds::domain::models::CredentialFileConfig;
use vertex_creds::{CredentialBundle, CredentialFetcher, FetchError, LogSink, SessionEndpoint};

pub const TRANSPORT_URL: &str =
    "ws://backend:8080/api/projects/test-project/sessions/test-session/ws";

pub const CREDENTIALS_PATH: &str =
    "/api/projects/test-project/agentic-sessions/test-session/vertex/credentials";

pub const SERVICE_ACCOUNT_JSON: &str =
    r#"{"type": "service_account", "project_id": "test-project"}"#;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Credential file settings writing into `dir`
pub fn file_settings(dir: &TempDir) -> CredentialFileConfig {
    CredentialFileConfig {
        path: dir.path().join("vertex-credentials.json"),
        ..Default::default()
    }
}

/// Transport URL for a session served by a mock backend at `server_url`
pub fn transport_url_for(server_url: &str) -> String {
    format!(
        "{}/api/projects/test-project/sessions/test-session/ws",
        server_url.replacen("http://", "ws://", 1)
    )
}

/// A valid backend response body
pub fn valid_backend_body() -> String {
    serde_json::json!({
        "credentials": SERVICE_ACCOUNT_JSON,
        "projectId": "test-project-123",
        "region": "us-central1"
    })
    .to_string()
}

/// Run `fut` to completion with `BOT_TOKEN` set to `token` (or unset).
///
/// Env access is serialized by temp-env, so tests touching `BOT_TOKEN` never
/// observe each other's values.
pub fn with_bot_token<F>(token: Option<&str>, fut: F) -> F::Output
where
    F: Future,
{
    temp_env::with_var("BOT_TOKEN", token, || tokio_test::block_on(fut))
}

/// Fetcher double returning a canned outcome and recording requested URLs
pub struct StubFetcher {
    outcome: Box<dyn Fn() -> Result<CredentialBundle, FetchError> + Send + Sync>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn returning(credentials: &str, project_id: &str, region: &str) -> Self {
        let (credentials, project_id, region) = (
            credentials.to_string(),
            project_id.to_string(),
            region.to_string(),
        );
        Self::with(move || Ok(CredentialBundle::new(&*credentials, &*project_id, &*region)))
    }

    pub fn failing<E>(error: E) -> Self
    where
        E: Fn() -> FetchError + Send + Sync + 'static,
    {
        Self::with(move || Err(error()))
    }

    fn with<F>(outcome: F) -> Self
    where
        F: Fn() -> Result<CredentialBundle, FetchError> + Send + Sync + 'static,
    {
        Self {
            outcome: Box::new(outcome),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialFetcher for StubFetcher {
    async fn fetch(&self, endpoint: &SessionEndpoint) -> Result<CredentialBundle, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap()
            .push(endpoint.credentials_url().to_string());
        (self.outcome)()
    }
}

/// Log sink double capturing every message
#[derive(Default)]
pub struct RecordingLogSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for RecordingLogSink {
    async fn send_log(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

/// Permission bits of `path`
#[cfg(unix)]
pub fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .expect("credential file should exist")
        .permissions()
        .mode()
        & 0o777
}
