//! TMDB API response types and search parameters.

use serde::Deserialize;

// --- Media Type ---

/// Media type as used in TMDB paths and `search/multi` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TmdbMediaType {
    /// Feature film (`movie`).
    Movie,
    /// TV series (`tv`).
    Tv,
}

impl TmdbMediaType {
    /// Path segment for the detail endpoint (`movie/{id}` or `tv/{id}`).
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Parses the `media_type` field of a multi search result.
    ///
    /// Returns `None` for kinds without a runtime (e.g. `person`).
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for TmdbMediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

// --- Search Multi ---

/// Response from `search/multi` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchMultiResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Search results, ranked by relevance.
    pub results: Vec<TmdbMultiSearchResult>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single `search/multi` result (movie, tv, or person).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMultiSearchResult {
    /// TMDB ID, scoped to `media_type`.
    pub id: u64,
    /// Raw media type (`movie`, `tv`, `person`).
    #[serde(default)]
    pub media_type: Option<String>,
    /// Localized title (movies).
    #[serde(default)]
    pub title: Option<String>,
    /// Localized name (tv, person).
    #[serde(default)]
    pub name: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl TmdbMultiSearchResult {
    /// Parsed media type, `None` for people and unknown kinds.
    #[must_use]
    pub fn media_kind(&self) -> Option<TmdbMediaType> {
        self.media_type.as_deref().and_then(TmdbMediaType::from_wire)
    }

    /// Title for movies, name for series; whichever is present and non-empty.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

// --- Title Details ---

/// Response from `movie/{id}` and `tv/{id}` endpoints.
///
/// Only the fields used for watch-time estimation are modelled, and every
/// one of them is optional: TMDB omits or nulls them freely for sparse
/// entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbTitleDetails {
    /// TMDB ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Localized title (movies).
    #[serde(default)]
    pub title: Option<String>,
    /// Localized name (series).
    #[serde(default)]
    pub name: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Runtime in minutes (movies).
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Typical episode runtimes in minutes (series).
    #[serde(default)]
    pub episode_run_time: Option<Vec<u32>>,
    /// Total number of episodes (series).
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    /// Total number of seasons (series).
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    /// Release status (e.g., "Released", "Ended").
    #[serde(default)]
    pub status: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

// --- Search Parameters ---

/// Parameters for `search/multi` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMultiParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "es-ES").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMultiParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("es-ES"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
