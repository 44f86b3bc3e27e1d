//! Reply text rendering.

use crate::types::SensorReading;

/// Factor applied to the endpoint's pressure value before display as mmHg.
pub const PRESSURE_TO_MMHG: f64 = 0.75;

/// Render a reading as the three-line reply sent to the user.
#[must_use]
pub fn render_reading(reading: &SensorReading) -> String {
    #[allow(clippy::arithmetic_side_effects)]
    let pressure = reading.pressure * PRESSURE_TO_MMHG;
    format!(
        "🌡️ Temperature: {:.2}°C\n💧 Humidity: {:.2}%\n🌪️ Pressure: {:.2}mmHg",
        reading.temperature, reading.humidity, pressure,
    )
}

/// Reply sent when the sensor fetch fails.
pub fn render_fetch_error(err: &impl std::fmt::Display) -> String {
    format!("Error fetching sensor data: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_reference_reading() {
        let text = render_reading(&SensorReading::new(21.5, 60.0, 1000.0));
        assert_eq!(
            text,
            "🌡️ Temperature: 21.50°C\n💧 Humidity: 60.00%\n🌪️ Pressure: 750.00mmHg"
        );
    }

    #[test]
    fn rounds_to_two_decimals() {
        let text = render_reading(&SensorReading::new(-3.14159, 45.678, 1013.25));
        assert!(text.contains("Temperature: -3.14°C"));
        assert!(text.contains("Humidity: 45.68%"));
        // 1013.25 * 0.75 = 759.9375
        assert!(text.contains("Pressure: 759.94mmHg"));
    }

    #[test]
    fn has_no_trailing_newline() {
        let text = render_reading(&SensorReading::new(0.0, 0.0, 0.0));
        assert_eq!(text.lines().count(), 3);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn fetch_error_prefix() {
        assert_eq!(
            render_fetch_error(&"boom"),
            "Error fetching sensor data: boom"
        );
    }
}
