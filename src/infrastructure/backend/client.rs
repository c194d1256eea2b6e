//! reqwest-based [`CredentialFetcher`] for the session backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::domain::errors::FetchError;
use crate::domain::models::{BackendConfig, CredentialBundle, SessionEndpoint};
use crate::domain::ports::CredentialFetcher;
use crate::infrastructure::logging::SecretScrubber;

/// Longest error body kept in a [`FetchError::BackendStatus`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Wire shape of the backend's credential response.
///
/// Fields stay optional here so a missing one is reported by name instead
/// of as a generic decode error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialPayload {
    credentials: Option<String>,
    project_id: Option<String>,
    region: Option<String>,
}

impl CredentialPayload {
    fn into_bundle(self) -> Result<CredentialBundle, FetchError> {
        let credentials = required(self.credentials, "credentials")?;
        let project_id = required(self.project_id, "projectId")?;
        let region = required(self.region, "region")?;

        Ok(CredentialBundle {
            credentials: SecretString::from(credentials),
            project_id,
            region,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FetchError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(FetchError::IncompleteResponse(field))
}

/// HTTP client for the session backend's Vertex credential endpoint
///
/// - One GET per call, no retries
/// - Bearer token read from the environment at call time
/// - Explicit request timeout
pub struct HttpCredentialFetcher {
    http_client: ReqwestClient,
    token_env: String,
    scrubber: SecretScrubber,
}

impl HttpCredentialFetcher {
    /// Create a fetcher from backend configuration
    ///
    /// # Returns
    /// * `Err(FetchError::Transport)` - the HTTP client could not be built
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            token_env: config.token_env.clone(),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Name of the environment variable the bearer token is read from
    pub fn token_env(&self) -> &str {
        &self.token_env
    }

    fn bearer_token(&self) -> Result<SecretString, FetchError> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(SecretString::from(token)),
            _ => Err(FetchError::MissingToken(self.token_env.clone())),
        }
    }

    /// Convert the HTTP response into a bundle
    async fn handle_response(&self, response: Response) -> Result<CredentialBundle, FetchError> {
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let body = self.scrubber.scrub_truncated(&body, MAX_ERROR_BODY_CHARS);

            warn!(status = status.as_u16(), body = %body, "Backend rejected credential request");
            return Err(FetchError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let payload: CredentialPayload = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        payload.into_bundle().inspect_err(|err| {
            warn!(error = %err, "Backend returned incomplete credential data");
        })
    }
}

#[async_trait]
impl CredentialFetcher for HttpCredentialFetcher {
    #[instrument(
        skip(self, endpoint),
        fields(project = %endpoint.identity().project_id, session = %endpoint.identity().session_id)
    )]
    async fn fetch(&self, endpoint: &SessionEndpoint) -> Result<CredentialBundle, FetchError> {
        let token = self.bearer_token()?;
        let url = endpoint.credentials_url();

        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .inspect_err(|err| warn!(error = %err, "Credential request to backend failed"))?;

        self.handle_response(response).await
    }
}
