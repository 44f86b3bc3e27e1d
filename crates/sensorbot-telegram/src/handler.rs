//! Message handler: converts Telegram messages and routes them.

use std::sync::Arc;

use sensorbot_core::{CommandRouter, InboundMessage, SensorClient};
use teloxide::types::Message;
use tracing::warn;

use crate::transport::TelegramTransport;

/// Shared bot state passed to all handlers.
#[derive(Clone)]
pub struct BotState {
    /// Router shared by every update.
    pub router: Arc<CommandRouter<SensorClient>>,
    /// Sends replies back through the Bot API.
    pub transport: TelegramTransport,
}

/// Convert a Telegram message into the router's input.
///
/// Non-text messages become empty text. The router denies them for
/// strangers and ignores them for authorized senders. A sender
/// id that does not fit in `i64` is treated as an absent sender.
pub fn inbound_from_message(msg: &Message) -> InboundMessage {
    let sender_id = msg
        .from
        .as_ref()
        .and_then(|user| i64::try_from(user.id.0).ok());
    InboundMessage::new(sender_id, msg.chat.id.0, msg.text().unwrap_or_default())
}

/// Handle an incoming message.
pub async fn handle_message(msg: Message, state: BotState) -> anyhow::Result<()> {
    let inbound = inbound_from_message(&msg);

    if let Err(e) = state.router.handle(&inbound, &state.transport).await {
        warn!(chat_id = inbound.chat_id, error = %e, "failed to send reply");
    }

    Ok(())
}
