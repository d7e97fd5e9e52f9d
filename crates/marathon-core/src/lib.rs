//! Core logic for marathon-bot.
//!
//! Resolves a free-text title to a catalog entry, normalizes its runtime
//! data, and turns it into a watch-time plan with an optional chart and
//! LLM-written description.

/// Session fitting into a time budget.
pub mod adjust;
/// Catalog facade over the TMDB client.
pub mod catalog;
/// Pie chart rendering.
pub mod chart;
/// Error taxonomy.
pub mod error;
/// Markdown cleanup for chat output.
pub mod markdown;
/// Chat reply templates.
pub mod message;
/// Optional LLM-written replies.
pub mod narrative;
/// Detail payload normalization.
pub mod normalize;
/// Watch-time arithmetic.
pub mod planner;
/// Per-request identifiers.
pub mod request;

pub use adjust::{FitSummary, SessionFit, adjust};
pub use catalog::Catalog;
pub use chart::ChartRenderer;
pub use error::{AdjustError, GenerationUnavailable, LookupError, RenderError};
pub use narrative::NarrativeWriter;
pub use normalize::{DetailRecord, MediaKind, SearchHit};
pub use planner::{DEFAULT_PAUSE_MINUTES, MarathonPlan, plan};
pub use request::RequestId;
