//! `LogSink` adapter over tracing.

use async_trait::async_trait;

use super::secret_scrubbing::SecretScrubber;
use crate::domain::ports::LogSink;

/// [`LogSink`] that forwards operator messages to `tracing`.
///
/// Messages are scrubbed before they are emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink {
    scrubber: SecretScrubber,
}

impl TracingLogSink {
    /// Create a sink
    pub const fn new() -> Self {
        Self {
            scrubber: SecretScrubber::new(),
        }
    }
}

#[async_trait]
impl LogSink for TracingLogSink {
    async fn send_log(&self, message: String) {
        let message = self.scrubber.scrub_message(&message);
        tracing::info!(target: "vertex_creds::session_log", "{message}");
    }
}
