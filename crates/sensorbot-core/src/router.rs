//! Command router: authorization, dispatch, and the fetch-and-reply flow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::AuthorizedUsers;
use crate::command::{Command, WEATHER_BUTTON};
use crate::error::{AuthorizationError, TransportResult};
use crate::format::{render_fetch_error, render_reading};
use crate::sensor::SensorSource;
use crate::transport::Transport;
use crate::types::{InboundMessage, OutboundMessage, ReplyKeyboard};

/// Reply to senders that are not on the allow-list.
pub const UNAUTHORIZED_TEXT: &str = "You are not authorized to use this bot.";

/// Reply to `/start`.
pub const WELCOME_TEXT: &str = "Welcome! Use the keyboard below to get weather data.";

/// Turns inbound messages into replies.
///
/// Holds no per-message state; a single router can serve concurrent
/// messages from any number of chats.
pub struct CommandRouter<S> {
    users: Arc<AuthorizedUsers>,
    sensor: S,
}

impl<S> CommandRouter<S> {
    /// Create a router over a shared allow-list and a sensor source.
    pub fn new(users: Arc<AuthorizedUsers>, sensor: S) -> Self {
        Self { users, sensor }
    }

    /// The allow-list in use.
    #[must_use]
    pub fn users(&self) -> &AuthorizedUsers {
        &self.users
    }

    /// The sensor source in use.
    #[must_use]
    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}

impl<S: SensorSource> CommandRouter<S> {
    /// Compute the reply to `msg`, if any.
    ///
    /// Every reply is addressed to `msg.chat_id`. The sensor is only
    /// queried for authorized senders.
    pub async fn route(&self, msg: &InboundMessage) -> Option<OutboundMessage> {
        let chat_id = msg.chat_id;

        if let Err(e) = self.users.check(msg.sender_id) {
            match e {
                AuthorizationError::NotAuthorized { sender_id } => {
                    warn!(sender_id, chat_id, "unauthorized access attempt");
                },
                AuthorizationError::AnonymousSender => {
                    warn!(chat_id, "unauthorized access attempt without sender");
                },
            }
            return Some(OutboundMessage::text(chat_id, UNAUTHORIZED_TEXT));
        }

        // Non-text messages arrive with empty text.
        if msg.text.is_empty() {
            return None;
        }

        match Command::parse(&msg.text) {
            Command::Start => Some(
                OutboundMessage::text(chat_id, WELCOME_TEXT)
                    .with_keyboard(ReplyKeyboard::single(WEATHER_BUTTON)),
            ),
            Command::WeatherRequest => Some(self.weather_reply(chat_id).await),
            Command::Unrecognized => {
                debug!(chat_id, "ignoring unrecognized message");
                None
            },
        }
    }

    /// Route `msg` and deliver the reply through `transport`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the reply could not be sent.
    pub async fn handle<T>(&self, msg: &InboundMessage, transport: &T) -> TransportResult<()>
    where
        T: Transport + ?Sized,
    {
        match self.route(msg).await {
            Some(reply) => transport.send(reply).await,
            None => Ok(()),
        }
    }

    async fn weather_reply(&self, chat_id: i64) -> OutboundMessage {
        match self.sensor.fetch().await {
            Ok(reading) => {
                info!(chat_id, "sending sensor reading");
                OutboundMessage::text(chat_id, render_reading(&reading))
            },
            Err(e) => {
                warn!(chat_id, error = %e, "sensor fetch failed");
                OutboundMessage::text(chat_id, render_fetch_error(&e))
            },
        }
    }
}
