//! The outbound side of a chat platform.

use async_trait::async_trait;

use crate::error::TransportResult;
use crate::types::OutboundMessage;

/// Delivers replies to a chat platform.
///
/// Incoming messages are pushed to [`CommandRouter::handle`] by the
/// frontend, so only the send direction needs a seam here.
///
/// [`CommandRouter::handle`]: crate::CommandRouter::handle
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `message` to `message.chat_id`.
    async fn send(&self, message: OutboundMessage) -> TransportResult<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, message: OutboundMessage) -> TransportResult<()> {
        (**self).send(message).await
    }
}
