//! Error types for routing, sensor fetches and transports.

use thiserror::Error;

/// Errors produced while fetching a reading from the sensor endpoint.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The request failed to complete (connection refused, timeout, I/O).
    #[error("could not fetch sensor data: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with something other than `200 OK`.
    #[error("bad response status: {status}")]
    BadStatus {
        /// Status observed on the response.
        status: reqwest::StatusCode,
    },

    /// The body was not JSON or lacked one of the expected fields.
    #[error("could not decode sensor data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for sensor operations.
pub type SensorResult<T> = Result<T, SensorError>;

/// A sender that is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// The sender id is known but not allowed.
    #[error("user {sender_id} is not authorized")]
    NotAuthorized {
        /// Rejected sender.
        sender_id: i64,
    },

    /// The message carried no sender (channel posts, anonymous admins).
    #[error("message has no sender")]
    AnonymousSender,
}

/// An allow-list entry that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid user ID '{entry}'")]
pub struct InvalidUserId {
    /// The offending entry, trimmed.
    pub entry: String,
}

/// Errors reported by a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The platform rejected or failed to deliver the message.
    #[error("failed to send message to chat {chat_id}: {reason}")]
    Send {
        /// Destination chat.
        chat_id: i64,
        /// Platform error text.
        reason: String,
    },
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
