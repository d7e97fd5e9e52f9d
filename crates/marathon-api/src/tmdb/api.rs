//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{SearchMultiParams, TmdbMediaType, TmdbSearchMultiResponse, TmdbTitleDetails};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies, series and people in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbSearchMultiResponse>;

    /// Fetches movie or series details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn title_details(
        &self,
        media_type: TmdbMediaType,
        id: u64,
        language: &str,
    ) -> Result<TmdbTitleDetails>;
}
