//! Normalization of catalog detail payloads into [`DetailRecord`].
//!
//! Every input field is optional, so the mapping is total: missing data
//! falls back to fixed defaults instead of failing.

use marathon_api::tmdb::{TmdbMediaType, TmdbTitleDetails};

/// Episode length assumed when a series reports no runtimes.
pub const DEFAULT_SERIES_EPISODE_MINUTES: u32 = 45;

/// Title used when the payload carries none.
pub const UNTITLED: &str = "Untitled";

/// Synopsis used when the payload carries none.
pub const NO_SYNOPSIS: &str = "No description available.";

/// Movie or series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature film; always one unit.
    Movie,
    /// Episodic series.
    Series,
}

impl MediaKind {
    /// Catalog media type for detail lookups.
    #[must_use]
    pub const fn catalog_type(self) -> TmdbMediaType {
        match self {
            Self::Movie => TmdbMediaType::Movie,
            Self::Series => TmdbMediaType::Tv,
        }
    }

    /// Human label used in replies.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
        }
    }
}

impl From<TmdbMediaType> for MediaKind {
    fn from(value: TmdbMediaType) -> Self {
        match value {
            TmdbMediaType::Movie => Self::Movie,
            TmdbMediaType::Tv => Self::Series,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// First usable search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Catalog identifier.
    pub external_id: u64,
    /// Movie or series.
    pub media_kind: MediaKind,
    /// Title as listed in search results.
    pub display_name: String,
}

/// Normalized runtime data for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    /// Display title.
    pub title: String,
    /// Movie or series.
    pub media_kind: MediaKind,
    /// Plot summary.
    pub synopsis: String,
    /// Minutes per unit (the movie, or one episode).
    pub unit_minutes: u32,
    /// Number of units; 1 for movies, 0 when a series total is unknown.
    pub unit_count: u32,
}

impl DetailRecord {
    /// Whether the episode total of a series is unknown.
    #[must_use]
    pub const fn has_unknown_count(&self) -> bool {
        matches!(self.media_kind, MediaKind::Series) && self.unit_count == 0
    }
}

/// Maps a raw detail payload to a [`DetailRecord`].
#[must_use]
pub fn normalize(details: &TmdbTitleDetails, kind: MediaKind) -> DetailRecord {
    let (unit_minutes, unit_count) = match kind {
        MediaKind::Movie => (details.runtime.unwrap_or(0), 1),
        MediaKind::Series => (
            details
                .episode_run_time
                .as_deref()
                .and_then(floor_mean)
                .unwrap_or(DEFAULT_SERIES_EPISODE_MINUTES),
            details.number_of_episodes.unwrap_or(0),
        ),
    };

    DetailRecord {
        title: first_non_blank(&[details.title.as_deref(), details.name.as_deref()])
            .unwrap_or(UNTITLED)
            .to_owned(),
        media_kind: kind,
        synopsis: first_non_blank(&[details.overview.as_deref()])
            .unwrap_or(NO_SYNOPSIS)
            .to_owned(),
        unit_minutes,
        unit_count,
    }
}

/// Floor of the arithmetic mean; `None` for an empty slice.
fn floor_mean(values: &[u32]) -> Option<u32> {
    let count = u64::try_from(values.len()).ok().filter(|n| *n > 0)?;
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    u32::try_from(sum / count).ok()
}

fn first_non_blank<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}
