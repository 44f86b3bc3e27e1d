//! Sensorbot Core - command routing for the sensor relay bot.
//!
//! This crate provides:
//! - The message types exchanged with a chat transport
//! - The allow-list of users permitted to talk to the bot
//! - The HTTP client for the local sensor endpoint
//! - Rendering of sensor readings into reply text
//! - The [`CommandRouter`] tying all of the above together
//!
//! The chat platform itself stays outside this crate. Frontends implement
//! [`Transport`] and feed each incoming message to
//! [`CommandRouter::handle`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use sensorbot_core::{AuthorizedUsers, CommandRouter, InboundMessage, SensorClient};
//!
//! # async fn demo() -> Result<(), sensorbot_core::SensorError> {
//! let users: AuthorizedUsers = [42_i64].into_iter().collect();
//! let sensor = SensorClient::new("http://localhost:9111/sensor-data", Duration::from_secs(5))?;
//! let router = CommandRouter::new(Arc::new(users), sensor);
//!
//! let reply = router.route(&InboundMessage::new(Some(42), 42, "/start")).await;
//! assert!(reply.is_some());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod auth;
pub mod command;
pub mod error;
pub mod format;
pub mod router;
pub mod sensor;
pub mod transport;
pub mod types;

pub use auth::{AuthorizedUsers, parse_user_ids};
pub use command::Command;
pub use error::{
    AuthorizationError, InvalidUserId, SensorError, SensorResult, TransportError, TransportResult,
};
pub use format::render_reading;
pub use router::CommandRouter;
pub use sensor::{SensorClient, SensorSource};
pub use transport::Transport;
pub use types::{InboundMessage, OutboundMessage, ReplyKeyboard, SensorReading};
