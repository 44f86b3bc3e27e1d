//! Messages exchanged with the chat transport, and the sensor reading.

use serde::{Deserialize, Serialize};

/// One reading from the sensor endpoint.
///
/// Decoded straight from the endpoint's JSON body; all three fields are
/// required and kept exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Pressure in the unit reported by the endpoint.
    pub pressure: f64,
}

impl SensorReading {
    /// Create a reading from its three components.
    #[must_use]
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }
}

/// A message delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender user id. `None` when the platform does not expose one.
    pub sender_id: Option<i64>,
    /// Chat the message arrived in; replies go back here.
    pub chat_id: i64,
    /// Raw message text. Empty for non-text messages.
    pub text: String,
}

impl InboundMessage {
    /// Create an inbound message.
    pub fn new(sender_id: Option<i64>, chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            sender_id,
            chat_id,
            text: text.into(),
        }
    }
}

/// A message to hand to the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination chat.
    pub chat_id: i64,
    /// Plain text body.
    pub text: String,
    /// Optional reply keyboard shown under the input field.
    pub keyboard: Option<ReplyKeyboard>,
}

impl OutboundMessage {
    /// Create a plain text message.
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
        }
    }

    /// Attach a reply keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: ReplyKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Buttons that send their label back as a normal message when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyKeyboard {
    /// Button labels, row by row.
    pub rows: Vec<Vec<String>>,
    /// Ask the client to shrink the keyboard to fit its buttons.
    pub resize: bool,
}

impl ReplyKeyboard {
    /// A keyboard with one button.
    pub fn single(label: impl Into<String>) -> Self {
        Self {
            rows: vec![vec![label.into()]],
            resize: true,
        }
    }

    /// Iterate over every button label.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_decodes_from_endpoint_json() {
        let reading: SensorReading =
            serde_json::from_str(r#"{"temperature": 21.5, "humidity": 60, "pressure": 1000.25}"#)
                .unwrap();
        assert_eq!(reading, SensorReading::new(21.5, 60.0, 1000.25));
    }

    #[test]
    fn reading_requires_all_fields() {
        let result =
            serde_json::from_str::<SensorReading>(r#"{"temperature": 21.5, "humidity": 60}"#);
        assert!(result.is_err());
    }

    #[test]
    fn reading_rejects_non_numeric_fields() {
        let result = serde_json::from_str::<SensorReading>(
            r#"{"temperature": "warm", "humidity": 60, "pressure": 1000}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn single_keyboard_has_one_button() {
        let kb = ReplyKeyboard::single("press me");
        assert_eq!(kb.labels().collect::<Vec<_>>(), vec!["press me"]);
        assert!(kb.resize);
    }

    #[test]
    fn outbound_with_keyboard() {
        let msg = OutboundMessage::text(5, "hi").with_keyboard(ReplyKeyboard::single("go"));
        assert_eq!(msg.chat_id, 5);
        assert_eq!(msg.text, "hi");
        assert!(msg.keyboard.is_some());
    }
}
