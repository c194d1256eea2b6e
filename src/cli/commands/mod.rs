//! CLI command implementations.

pub mod env;
pub mod install;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::types::SessionArgs;
use crate::domain::errors::{FetchError, InstallError};
use crate::domain::models::{
    parse_base_url, Config, ConnectionIdentity, CredentialFileDescriptor, SessionEndpoint,
};
use crate::infrastructure::backend::HttpCredentialFetcher;
use crate::infrastructure::logging::TracingLogSink;
use crate::services::CredentialInstaller;

/// Run one install for the session described by `args`.
///
/// Explicit `--project`/`--session` win over the connection URL. The backend
/// base URL comes from `--backend-url`, then configuration, then the
/// connection URL itself.
pub async fn run_install(args: &SessionArgs, config: &Config) -> Result<CredentialFileDescriptor> {
    let fetcher =
        HttpCredentialFetcher::new(&config.backend).context("Failed to build backend HTTP client")?;
    let installer = CredentialInstaller::new(
        Arc::new(fetcher),
        Arc::new(TracingLogSink::new()),
        config.credentials.clone(),
    );

    let base_url = args
        .backend_url
        .as_deref()
        .or(config.backend.base_url.as_deref())
        .map(parse_base_url)
        .transpose()
        .context("Invalid backend URL")?;

    let descriptor = match (args.project.as_deref(), args.session.as_deref()) {
        (Some(project), Some(session)) => {
            let endpoint = explicit_endpoint(project, session, base_url)?;
            installer.install(&endpoint).await?
        }
        _ => {
            let installer = match base_url {
                Some(base_url) => installer.with_base_url(base_url),
                None => installer,
            };
            installer
                .install_from_connection_url(args.connection_url.as_deref())
                .await?
        }
    };

    Ok(descriptor)
}

fn explicit_endpoint(
    project: &str,
    session: &str,
    base_url: Option<url::Url>,
) -> Result<SessionEndpoint, InstallError> {
    let identity = ConnectionIdentity::new(project, session)?;
    let base_url = base_url.ok_or_else(|| {
        FetchError::IdentityUnresolved(
            "a backend URL is required with --project/--session".to_string(),
        )
    })?;
    Ok(SessionEndpoint::new(base_url, identity))
}
