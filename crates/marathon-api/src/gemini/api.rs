//! `GeminiApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini text-generation API trait.
///
/// Abstracts the single request/response call for mock substitution in tests.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(GeminiApi: Send)]
pub trait LocalGeminiApi {
    /// Generates content for a single-turn request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the service answers with
    /// a non-2xx status, or the body cannot be decoded.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
