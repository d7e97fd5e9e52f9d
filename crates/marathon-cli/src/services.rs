//! Shared request-handling components, built once at startup.

use anyhow::{Context, Result};
use marathon_api::gemini::{GeminiApi, GeminiClient};
use marathon_api::telegram::TelegramClient;
use marathon_api::tmdb::{TmdbApi, TmdbClient};
use marathon_core::{Catalog, ChartRenderer, NarrativeWriter};
use tracing::instrument;

use crate::config::AppConfig;

/// User-Agent sent to every API.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Catalog, narrative writer and chart renderer for one process.
///
/// Holds no per-request state; shared behind an `Arc` by the bot.
#[derive(Debug)]
pub struct Services<C, G> {
    /// Title lookup.
    pub catalog: Catalog<C>,
    /// Optional LLM text.
    pub narrative: NarrativeWriter<G>,
    /// Chart output.
    pub charts: ChartRenderer,
    /// Break after each unit, in minutes.
    pub pause_minutes: u32,
}

impl<C: TmdbApi + Sync, G: GeminiApi + Sync> Services<C, G> {
    /// Assembles services from already-built parts.
    pub const fn new(
        catalog: Catalog<C>,
        narrative: NarrativeWriter<G>,
        charts: ChartRenderer,
        pause_minutes: u32,
    ) -> Self {
        Self {
            catalog,
            narrative,
            charts,
            pause_minutes,
        }
    }
}

/// Builds the production services from config and environment.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or a client fails to build.
#[instrument(skip_all)]
pub fn build_services(config: &AppConfig) -> Result<Services<TmdbClient, GeminiClient>> {
    let tmdb = build_tmdb_client(config)?;
    let narrative = match build_gemini_client(config)? {
        Some(client) => NarrativeWriter::new(client),
        None => NarrativeWriter::disabled(),
    };
    let charts = ChartRenderer::new(config.chart.output_dir());

    tracing::debug!(
        language = %config.catalog.language,
        generation = narrative.is_enabled(),
        charts = %charts.output_dir().display(),
        "services ready"
    );

    Ok(Services::new(
        Catalog::new(tmdb, config.catalog.language.as_str()),
        narrative,
        charts,
        config.plan.pause_minutes,
    ))
}

/// Creates a TMDB client from `TMDB_API_TOKEN`.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(USER_AGENT)
        .timeout(config.catalog_timeout())
        .build()
        .context("failed to build TMDB client")
}

/// Creates a Gemini client from `GEMINI_API_KEY`, or `None` when generation
/// is disabled or the key is absent.
///
/// # Errors
///
/// Returns an error if the client fails to build.
fn build_gemini_client(config: &AppConfig) -> Result<Option<GeminiClient>> {
    if !config.generation.enabled {
        tracing::info!("text generation disabled by config");
        return Ok(None);
    }
    let Some(api_key) = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
    else {
        tracing::info!("GEMINI_API_KEY not set, text generation disabled");
        return Ok(None);
    };

    GeminiClient::builder()
        .api_key(api_key)
        .model(config.generation.model.as_str())
        .user_agent(USER_AGENT)
        .timeout(config.generation_timeout())
        .build()
        .map(Some)
        .context("failed to build Gemini client")
}

/// Creates a Telegram client from `TELEGRAM_BOT_TOKEN`.
///
/// # Errors
///
/// Returns an error if `TELEGRAM_BOT_TOKEN` is not set or the client fails to
/// build.
pub fn build_telegram_client() -> Result<TelegramClient> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
        .context("TELEGRAM_BOT_TOKEN environment variable is required")?;

    TelegramClient::builder()
        .token(token)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build Telegram client")
}
