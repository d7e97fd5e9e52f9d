//! API client library for marathon-bot.
//!
//! Provides clients for the TMDB catalog, the Gemini text-generation
//! endpoint, and the Telegram Bot API.

/// Gemini `generateContent` client.
pub mod gemini;

/// Telegram Bot API client.
pub mod telegram;

/// TMDB API client.
pub mod tmdb;
