//! [`Transport`] implementation backed by the Telegram Bot API.

use async_trait::async_trait;
use sensorbot_core::{OutboundMessage, ReplyKeyboard, Transport, TransportError, TransportResult};
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

/// Sends replies with `sendMessage`.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    /// Wrap a bot handle.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, message: OutboundMessage) -> TransportResult<()> {
        let chat_id = message.chat_id;
        let mut request = self.bot.send_message(ChatId(chat_id), message.text);
        if let Some(keyboard) = message.keyboard {
            request = request.reply_markup(ReplyMarkup::Keyboard(keyboard_markup(&keyboard)));
        }

        request
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Send {
                chat_id,
                reason: e.to_string(),
            })
    }
}

/// Build the Telegram reply keyboard for `keyboard`.
pub fn keyboard_markup(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
    let markup = KeyboardMarkup::new(rows);
    if keyboard.resize {
        markup.resize_keyboard()
    } else {
        markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_has_single_button() {
        let markup = keyboard_markup(&ReplyKeyboard::single("🌤️ Get Weather Data"));
        assert_eq!(markup.keyboard.len(), 1);
        assert_eq!(markup.keyboard[0].len(), 1);
        assert_eq!(markup.keyboard[0][0].text, "🌤️ Get Weather Data");
    }

    #[test]
    fn markup_preserves_rows() {
        let kb = ReplyKeyboard {
            rows: vec![vec!["a".to_owned(), "b".to_owned()], vec!["c".to_owned()]],
            resize: false,
        };
        let markup = keyboard_markup(&kb);
        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0].len(), 2);
        assert_eq!(markup.keyboard[1][0].text, "c");
    }
}
