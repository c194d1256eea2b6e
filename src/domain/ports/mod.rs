//! Port trait definitions (Hexagonal Architecture)
//!
//! - `CredentialFetcher`: obtains a credential bundle for a session
//! - `LogSink`: operator-facing log transport
//!
//! These traits keep the installer independent of HTTP and log delivery.

pub mod credential_fetcher;
pub mod log_sink;

pub use credential_fetcher::CredentialFetcher;
pub use log_sink::LogSink;
