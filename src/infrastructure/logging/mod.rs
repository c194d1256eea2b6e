//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or human-readable stderr output
//! - Optional rolling JSON log files
//! - Secret scrubbing for operator-visible messages
//! - `LogSink` adapter over tracing

pub mod logger;
pub mod secret_scrubbing;
pub mod sink;

pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
pub use sink::TracingLogSink;
