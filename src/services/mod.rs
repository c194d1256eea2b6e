//! Service layer
//!
//! Orchestrates a credential install over the domain ports.

pub mod credential_installer;

pub use credential_installer::CredentialInstaller;
