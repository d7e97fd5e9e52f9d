//! Error taxonomy for title lookup, chart rendering and generation.

use std::path::PathBuf;

/// Failure to resolve a title or fetch its details.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The catalog returned no movie or series for the query.
    #[error("no movie or series found for {query:?}")]
    NotFound {
        /// Normalized query that was searched.
        query: String,
    },
    /// Network failure, timeout, non-2xx status or undecodable payload.
    #[error("catalog retrieval failed: {0:#}")]
    Retrieval(#[source] anyhow::Error),
}

impl LookupError {
    /// Returns `true` for [`LookupError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure to produce the proportion chart.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A plan with zero total minutes has nothing to draw.
    #[error("plan has no minutes to chart")]
    EmptyPlan,
    /// The output directory could not be prepared.
    #[error("cannot prepare chart output {path}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The drawing backend failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

/// Text generation could not produce a usable answer.
///
/// Always recovered by falling back to a templated message.
#[derive(Debug, thiserror::Error)]
#[error("text generation unavailable: {reason}")]
pub struct GenerationUnavailable {
    /// Human-readable cause, for logs only.
    pub reason: String,
}

impl GenerationUnavailable {
    /// Creates a new instance from any displayable cause.
    pub fn new(reason: impl std::fmt::Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

/// Invalid time budget for a session adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdjustError {
    /// Available minutes must be at least 1.
    #[error("available minutes must be a positive number")]
    NoAvailableTime,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_retrieval_error_keeps_context_chain() {
        // Arrange
        let inner = anyhow::anyhow!("connection reset").context("request failed: search/multi");

        // Act
        let err = LookupError::Retrieval(inner);

        // Assert
        let text = err.to_string();
        assert!(text.contains("request failed: search/multi"));
        assert!(text.contains("connection reset"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_display() {
        let err = LookupError::NotFound {
            query: String::from("zzzz"),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no movie or series found for \"zzzz\"");
    }

    #[test]
    fn test_generation_unavailable_reason() {
        let err = GenerationUnavailable::new("generation disabled");
        assert_eq!(
            err.to_string(),
            "text generation unavailable: generation disabled"
        );
    }
}
