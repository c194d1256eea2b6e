//! vertex-creds - per-session Vertex AI credential provisioning
//!
//! Fetches short-lived Vertex AI credentials for one agentic session from the
//! session backend and installs them as an owner-read-only credential file
//! that a downstream process picks up via `GOOGLE_APPLICATION_CREDENTIALS`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): the credential installer
//! - **Infrastructure Layer** (`infrastructure`): HTTP fetcher, file writer, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vertex_creds::infrastructure::backend::HttpCredentialFetcher;
//! use vertex_creds::infrastructure::logging::TracingLogSink;
//! use vertex_creds::{Config, CredentialInstaller};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let installer = CredentialInstaller::new(
//!     Arc::new(HttpCredentialFetcher::new(&config.backend)?),
//!     Arc::new(TracingLogSink::new()),
//!     config.credentials.clone(),
//! );
//!
//! let descriptor = installer
//!     .install_from_connection_url(Some(
//!         "ws://backend:8080/api/projects/my-project/sessions/my-session/ws",
//!     ))
//!     .await?;
//! println!("{}", descriptor.credentials_path.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{FetchError, InstallError, KeyValidationError};
pub use domain::models::{
    Config, ConnectionIdentity, CredentialBundle, CredentialFileDescriptor, SessionEndpoint,
};
pub use domain::ports::{CredentialFetcher, LogSink};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::CredentialInstaller;
