//! Domain layer for credential provisioning
//!
//! Models, errors and the ports the infrastructure implements.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{FetchError, InstallError, InstallResult, KeyValidationError};
