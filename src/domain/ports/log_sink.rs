//! Operator log sink port.

use async_trait::async_trait;

/// Operator-facing log transport (for example the session's UI stream).
///
/// Delivery is fire-and-forget: a sink that cannot deliver drops the
/// message rather than failing the caller.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver one message.
    async fn send_log(&self, message: String);
}
