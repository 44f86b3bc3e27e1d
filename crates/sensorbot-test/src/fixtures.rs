//! Test fixtures for common types.

use sensorbot_core::command::{START_COMMAND, WEATHER_BUTTON};
use sensorbot_core::{AuthorizedUsers, InboundMessage, SensorReading};

/// The reading used in most tests: 21.5 °C, 60 %, 1000 raw pressure.
#[must_use]
pub fn test_reading() -> SensorReading {
    SensorReading::new(21.5, 60.0, 1000.0)
}

/// The rendered text of [`test_reading`].
pub const TEST_READING_TEXT: &str =
    "🌡️ Temperature: 21.50°C\n💧 Humidity: 60.00%\n🌪️ Pressure: 750.00mmHg";

/// JSON body the sensor endpoint returns for [`test_reading`].
#[must_use]
pub fn test_reading_json() -> String {
    r#"{"temperature": 21.5, "humidity": 60.0, "pressure": 1000.0}"#.to_owned()
}

/// An allow-list containing exactly `ids`.
#[must_use]
pub fn authorized(ids: &[i64]) -> AuthorizedUsers {
    ids.iter().copied().collect()
}

/// `/start` sent by `user_id` in their private chat.
#[must_use]
pub fn start_command(user_id: i64) -> InboundMessage {
    InboundMessage::new(Some(user_id), user_id, START_COMMAND)
}

/// A weather button press by `user_id` in their private chat.
#[must_use]
pub fn weather_request(user_id: i64) -> InboundMessage {
    InboundMessage::new(Some(user_id), user_id, WEATHER_BUTTON)
}

/// Arbitrary text sent by `user_id` in their private chat.
#[must_use]
pub fn text_message(user_id: i64, text: &str) -> InboundMessage {
    InboundMessage::new(Some(user_id), user_id, text)
}
