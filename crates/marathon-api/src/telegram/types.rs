//! Telegram Bot API types.
//!
//! Only the subset needed to receive text commands and answer them.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Result payload when `ok` is true.
    pub result: Option<T>,
    /// Error description when `ok` is false.
    #[serde(default)]
    pub description: Option<String>,
    /// Error code when `ok` is false.
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// An incoming update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier.
    pub update_id: i64,
    /// New incoming message. Other update kinds are ignored.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat.
    pub message_id: i64,
    /// Sender, absent for channel posts.
    #[serde(default)]
    pub from: Option<User>,
    /// Chat the message belongs to.
    pub chat: Chat,
    /// Unix timestamp.
    pub date: i64,
    /// Text body, absent for media messages.
    #[serde(default)]
    pub text: Option<String>,
}

/// A chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: i64,
    /// `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A user or bot.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Whether this is a bot.
    pub is_bot: bool,
    /// First name.
    pub first_name: String,
    /// Username without `@`.
    #[serde(default)]
    pub username: Option<String>,
}

/// Text formatting mode for outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    /// Legacy Markdown.
    Markdown,
    /// `MarkdownV2`.
    MarkdownV2,
    /// HTML.
    #[serde(rename = "HTML")]
    Html,
}

/// Body of `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    /// Target chat.
    pub chat_id: i64,
    /// Message text.
    pub text: String,
    /// Formatting mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
}

impl SendMessageParams {
    /// Plain-text message.
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
        }
    }

    /// Sets the formatting mode.
    #[must_use]
    pub const fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }
}

/// Body of `getUpdates`.
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesParams {
    /// First update to return; acknowledges everything before it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Long-polling timeout in seconds.
    pub timeout: u32,
    /// Update kinds to receive.
    pub allowed_updates: Vec<String>,
}

impl GetUpdatesParams {
    /// Long-poll for messages only.
    pub fn new(offset: Option<i64>, timeout: u32) -> Self {
        Self {
            offset,
            timeout,
            allowed_updates: vec![String::from("message")],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_get_updates_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/telegram/get_updates.json");

        // Act
        let response: TelegramResponse<Vec<Update>> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.ok);
        let updates = response.result.unwrap();
        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 5_550_001);
        assert_eq!(message.chat.kind, "private");
        assert_eq!(message.text.as_deref(), Some("/planear Breaking Bad"));
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn test_parse_error_envelope() {
        // Arrange
        let json = include_str!("../../../../fixtures/telegram/error_unauthorized.json");

        // Act
        let response: TelegramResponse<Message> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.error_code, Some(401));
    }

    #[test]
    fn test_send_message_params_serialization() {
        // Arrange
        let params = SendMessageParams::new(1, "*hola*").parse_mode(ParseMode::Markdown);

        // Act
        let value = serde_json::to_value(&params).unwrap();

        // Assert
        assert_eq!(value["parse_mode"], "Markdown");
        assert_eq!(
            serde_json::to_value(ParseMode::Html).unwrap(),
            serde_json::json!("HTML")
        );
        assert!(
            serde_json::to_value(SendMessageParams::new(1, "x"))
                .unwrap()
                .get("parse_mode")
                .is_none()
        );
    }
}
