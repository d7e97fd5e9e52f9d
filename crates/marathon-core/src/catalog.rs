//! Title resolution against the TMDB catalog.

use marathon_api::tmdb::{SearchMultiParams, TmdbApi};
use tracing::instrument;
use unicode_normalization::UnicodeNormalization;

use crate::error::LookupError;
use crate::normalize::{DetailRecord, MediaKind, SearchHit, normalize};

/// Default catalog language.
pub const DEFAULT_LANGUAGE: &str = "es-ES";

/// Resolves free-text titles to normalized detail records.
///
/// Stateless apart from the client and language; safe to share across
/// concurrent requests.
#[derive(Debug)]
pub struct Catalog<A> {
    api: A,
    language: String,
}

impl<A: TmdbApi + Sync> Catalog<A> {
    /// Wraps a TMDB client, querying in `language` (e.g. `es-ES`).
    pub fn new(api: A, language: impl Into<String>) -> Self {
        Self {
            api,
            language: language.into(),
        }
    }

    /// Catalog language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Underlying client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns the first movie or series matching `query`.
    ///
    /// Results of other kinds (people, collections) are skipped.
    ///
    /// # Errors
    ///
    /// - [`LookupError::NotFound`] when no movie or series matches.
    /// - [`LookupError::Retrieval`] when the request fails or the response
    ///   cannot be decoded.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<SearchHit, LookupError> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Err(LookupError::NotFound { query });
        }

        let params = SearchMultiParams::new(query.as_str()).language(self.language.as_str());
        let response = self
            .api
            .search_multi(&params)
            .await
            .map_err(LookupError::Retrieval)?;

        let hit = response.results.iter().find_map(|result| {
            let kind = result.media_kind()?;
            Some(SearchHit {
                external_id: result.id,
                media_kind: MediaKind::from(kind),
                display_name: result.display_name().unwrap_or_default().to_owned(),
            })
        });

        match hit {
            Some(hit) => {
                tracing::debug!(
                    id = hit.external_id,
                    kind = %hit.media_kind,
                    name = %hit.display_name,
                    "catalog hit"
                );
                Ok(hit)
            }
            None => {
                tracing::debug!(results = response.results.len(), "no movie or series hit");
                Err(LookupError::NotFound { query })
            }
        }
    }

    /// Fetches and normalizes the details of one title.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Retrieval`] when the request fails or the
    /// response cannot be decoded.
    #[instrument(skip_all, fields(id = id, kind = %kind))]
    pub async fn detail(&self, id: u64, kind: MediaKind) -> Result<DetailRecord, LookupError> {
        let details = self
            .api
            .title_details(kind.catalog_type(), id, &self.language)
            .await
            .map_err(LookupError::Retrieval)?;
        Ok(normalize(&details, kind))
    }

    /// Searches for `query` and fetches the details of the first hit.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::search`] and [`Self::detail`].
    pub async fn resolve(&self, query: &str) -> Result<DetailRecord, LookupError> {
        let hit = self.search(query).await?;
        self.detail(hit.external_id, hit.media_kind).await
    }
}

/// NFKC-normalizes `query` and collapses whitespace runs into single spaces.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    let composed: String = query.nfkc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}
