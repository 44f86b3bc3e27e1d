//! Recognized bot commands.

/// Text of the start command.
pub const START_COMMAND: &str = "/start";

/// Label of the keyboard button requesting a reading. Pressing the button
/// sends this exact text back to the bot.
pub const WEATHER_BUTTON: &str = "🌤️ Get Weather Data";

/// A command parsed from message text.
///
/// Matching is exact: no trimming, no case folding, no `/start@botname`
/// suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start` - greet the user and show the keyboard.
    Start,
    /// The weather button was pressed.
    WeatherRequest,
    /// Anything else.
    Unrecognized,
}

impl Command {
    /// Classify message text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            START_COMMAND => Self::Start,
            WEATHER_BUTTON => Self::WeatherRequest,
            _ => Self::Unrecognized,
        }
    }
}
