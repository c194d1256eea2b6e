//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Session backend HTTP client
//! - Protected credential file writer
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod logging;
