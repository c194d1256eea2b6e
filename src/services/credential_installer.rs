//! Credential installer service
//!
//! Turns one fetched credential bundle into an owner-read-only file and a
//! descriptor the caller can export to a downstream process.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{info, instrument, warn};
use url::Url;

use crate::domain::errors::{FetchError, InstallError, InstallResult};
use crate::domain::models::{
    CredentialBundle, CredentialFileConfig, CredentialFileDescriptor, ServiceAccountKey,
    SessionEndpoint,
};
use crate::domain::ports::{CredentialFetcher, LogSink};
use crate::infrastructure::credentials::write_protected;

/// Fetches and installs Vertex AI credentials for a session.
///
/// Every install is one fetch followed by one write. Nothing is retried and
/// nothing touches disk unless the bundle passed validation.
pub struct CredentialInstaller {
    fetcher: Arc<dyn CredentialFetcher>,
    log_sink: Arc<dyn LogSink>,
    settings: CredentialFileConfig,
    base_url_override: Option<Url>,
}

impl CredentialInstaller {
    /// Create an installer
    pub fn new(
        fetcher: Arc<dyn CredentialFetcher>,
        log_sink: Arc<dyn LogSink>,
        settings: CredentialFileConfig,
    ) -> Self {
        Self {
            fetcher,
            log_sink,
            settings,
            base_url_override: None,
        }
    }

    /// Use `base_url` instead of the one derived from a connection URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Install credentials for the session named by a transport URL.
    ///
    /// A missing or unparsable URL fails as [`InstallError::FetchFailed`],
    /// the same way a failed backend call does.
    pub async fn install_from_connection_url(
        &self,
        connection_url: Option<&str>,
    ) -> InstallResult<CredentialFileDescriptor> {
        let endpoint = connection_url
            .ok_or_else(|| {
                FetchError::IdentityUnresolved("no session connection URL available".to_string())
            })
            .and_then(SessionEndpoint::from_connection_url)
            .inspect_err(|err| warn!(error = %err, "Cannot resolve credential endpoint"))?;

        let endpoint = match self.base_url_override {
            Some(ref base_url) => endpoint.with_base_url(base_url.clone()),
            None => endpoint,
        };

        self.install(&endpoint).await
    }

    /// Fetch credentials for `endpoint` and write them to the configured path.
    ///
    /// Checks run in order and the first failure is returned:
    /// fetch, credentials, project id, region, then (if enabled) the
    /// service-account key shape. Only then is the file written.
    #[instrument(skip(self, endpoint), fields(session = %endpoint.identity()))]
    pub async fn install(
        &self,
        endpoint: &SessionEndpoint,
    ) -> InstallResult<CredentialFileDescriptor> {
        let bundle = self
            .fetcher
            .fetch(endpoint)
            .await
            .inspect_err(|err| warn!(error = %err, "Vertex credential fetch failed"))?;

        validate_bundle(&bundle)?;
        if self.settings.validate_service_account_key {
            self.check_service_account_key(&bundle)?;
        }

        let path = self.settings.target_path(endpoint.identity());
        let CredentialBundle {
            credentials,
            project_id,
            region,
        } = bundle;

        write_protected(&path, credentials)
            .await
            .map_err(|error| InstallError::WriteFailed {
                path: path.clone(),
                error,
            })?;

        info!(
            path = %path.display(),
            project_id = %project_id,
            region = %region,
            "Vertex AI credentials installed"
        );
        self.log_sink
            .send_log(format!(
                "Vertex AI credentials written to {} (project: {}, region: {})",
                path.display(),
                project_id,
                region
            ))
            .await;

        Ok(CredentialFileDescriptor {
            credentials_path: path,
            project_id,
            region,
        })
    }

    fn check_service_account_key(&self, bundle: &CredentialBundle) -> InstallResult<()> {
        let key = ServiceAccountKey::parse(bundle.credentials.expose_secret())?;
        if key.project_mismatch(&bundle.project_id) {
            warn!(
                key_project = key.project_id.as_deref().unwrap_or_default(),
                project_id = %bundle.project_id,
                "Service account project differs from the Vertex project; authentication may fail"
            );
        }
        Ok(())
    }
}

fn validate_bundle(bundle: &CredentialBundle) -> InstallResult<()> {
    match bundle.first_missing_field() {
        Some("credentials") => Err(InstallError::EmptyCredentials),
        Some("projectId") => Err(InstallError::EmptyProjectId),
        Some(_) => Err(InstallError::EmptyRegion),
        None => Ok(()),
    }
}
