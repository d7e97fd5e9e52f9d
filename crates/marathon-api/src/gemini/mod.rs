//! Gemini API client module.
//!
//! Single request/response text generation against
//! `models/{model}:generateContent`; no streaming, no multi-turn state.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{GeminiApi, LocalGeminiApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_MODEL, GeminiClient, GeminiClientBuilder};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
