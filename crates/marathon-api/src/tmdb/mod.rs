//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 `search/multi`, `movie/{id}`
//! and `tv/{id}` endpoints.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMultiParams, TmdbMediaType, TmdbMultiSearchResult, TmdbSearchMultiResponse,
    TmdbTitleDetails,
};
