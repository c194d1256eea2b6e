//! Domain models

pub mod config;
pub mod credential;
pub mod identity;
pub mod service_account;

pub use config::{
    BackendConfig, Config, CredentialFileConfig, LogFormat, LoggingConfig, RotationPolicy,
};
pub use credential::{CredentialBundle, CredentialFileDescriptor};
pub use identity::{parse_base_url, ConnectionIdentity, SessionEndpoint};
pub use service_account::ServiceAccountKey;
