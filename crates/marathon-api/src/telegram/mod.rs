//! Telegram Bot API client module.
//!
//! Long-polls `getUpdates` and answers with `sendMessage` and
//! `sendDocument`.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTelegramApi, TelegramApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TelegramClient, TelegramClientBuilder};
pub use types::{Chat, Message, ParseMode, SendMessageParams, Update, User};
