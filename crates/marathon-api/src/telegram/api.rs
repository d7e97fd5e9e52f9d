//! `TelegramApi` trait definition.
#![allow(clippy::future_not_send)]

use std::path::Path;

use anyhow::Result;

use super::types::{Message, SendMessageParams, Update, User};

/// Telegram Bot API trait.
///
/// Abstracts the chat transport for mock substitution in tests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TelegramApi: Send)]
pub trait LocalTelegramApi {
    /// Returns the bot's own account.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the Bot API reports
    /// `ok: false`.
    async fn get_me(&self) -> Result<User>;

    /// Long-polls for new updates starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the Bot API reports
    /// `ok: false`.
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u32) -> Result<Vec<Update>>;

    /// Sends a text message.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the Bot API reports
    /// `ok: false`.
    async fn send_message(&self, params: &SendMessageParams) -> Result<Message>;

    /// Uploads a local file as a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the upload fails, or the
    /// Bot API reports `ok: false`.
    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<Message>;
}
