//! Per-message command handling.

use anyhow::{Context, Result};
use marathon_api::gemini::GeminiApi;
use marathon_api::telegram::{Message, ParseMode, SendMessageParams, TelegramApi};
use marathon_api::tmdb::TmdbApi;
use marathon_core::message::{
    adjust_message, adjust_usage_message, analysis_fallback_message, analysis_message,
    help_message, invalid_minutes_message, missing_title_message, not_found_message,
    plan_message, plan_narrative_message, retrieval_error_message, searching_message,
    start_message, unknown_command_message,
};
use marathon_core::{DetailRecord, LookupError, MarathonPlan, RenderError, RequestId, plan};
use tracing::instrument;

use super::command::{Command, InputError, parse_adjust_args};
use crate::services::Services;

/// Answers chat commands.
#[derive(Debug)]
pub struct Bot<T, C, G> {
    telegram: T,
    services: Services<C, G>,
    username: Option<String>,
}

impl<T, C, G> Bot<T, C, G>
where
    T: TelegramApi + Sync,
    C: TmdbApi + Sync,
    G: GeminiApi + Sync,
{
    /// Creates a bot replying through `telegram`.
    pub const fn new(telegram: T, services: Services<C, G>) -> Self {
        Self {
            telegram,
            services,
            username: None,
        }
    }

    /// Sets the bot's own username, so group commands addressed to other
    /// bots are ignored.
    #[must_use]
    pub fn username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Chat transport.
    pub const fn telegram(&self) -> &T {
        &self.telegram
    }

    /// Handles one incoming message.
    ///
    /// Messages without text, plain text that is not a command and commands
    /// addressed to another bot are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if a reply cannot be delivered; lookup and
    /// generation failures are answered in the chat.
    #[instrument(skip_all, fields(chat_id = message.chat.id, request_id = %request_id))]
    pub async fn handle_message(&self, message: &Message, request_id: RequestId) -> Result<()> {
        let username = self.username.as_deref();
        let Some(command) = message
            .text
            .as_deref()
            .and_then(|text| Command::parse(text, username))
        else {
            return Ok(());
        };
        let chat_id = message.chat.id;
        tracing::info!(?command, "command received");

        match command {
            Command::Start => self.send_text(chat_id, start_message()).await,
            Command::Help => self.send_markdown(chat_id, help_message()).await,
            Command::Plan(title) => self.handle_plan(chat_id, &title, request_id).await,
            Command::Adjust(args) => self.handle_adjust(chat_id, &args).await,
            Command::Analysis(title) => self.handle_analysis(chat_id, &title).await,
            Command::Unknown(_) => self.send_text(chat_id, unknown_command_message()).await,
        }
    }

    /// `/plan`: lookup, plan, narrative or template reply, then the chart.
    async fn handle_plan(&self, chat_id: i64, title: &str, request_id: RequestId) -> Result<()> {
        if title.is_empty() {
            return self.send_text(chat_id, &missing_title_message("plan")).await;
        }
        let Some(detail) = self.lookup(chat_id, title).await? else {
            return Ok(());
        };

        let plan = plan(
            detail.unit_minutes,
            detail.unit_count,
            self.services.pause_minutes,
        );
        let reply = match self.services.narrative.describe_plan(&detail, &plan).await {
            Ok(narrative) => plan_narrative_message(&detail, &plan, &narrative),
            Err(e) => {
                tracing::debug!(reason = %e.reason, "using plan template");
                plan_message(&detail, &plan)
            }
        };
        self.send_markdown(chat_id, &reply).await?;
        self.send_chart(chat_id, &detail, plan, request_id).await
    }

    /// `/adjust`: fit a session into the user's time budget.
    async fn handle_adjust(&self, chat_id: i64, args: &str) -> Result<()> {
        let (title, minutes) = match parse_adjust_args(args) {
            Ok(parsed) => parsed,
            Err(InputError::InvalidMinutes(raw)) => {
                tracing::debug!(raw = %raw, "invalid minutes");
                return self.send_text(chat_id, invalid_minutes_message()).await;
            }
            Err(e) => {
                tracing::debug!(error = %e, "invalid adjust arguments");
                return self.send_text(chat_id, adjust_usage_message()).await;
            }
        };
        let Some(detail) = self.lookup(chat_id, &title).await? else {
            return Ok(());
        };

        match marathon_core::adjust(&detail, minutes, self.services.pause_minutes) {
            Ok(fit) => {
                self.send_markdown(chat_id, &adjust_message(&detail, &fit))
                    .await
            }
            Err(_) => self.send_text(chat_id, invalid_minutes_message()).await,
        }
    }

    /// `/analysis`: LLM tone and theme analysis, or the synopsis.
    async fn handle_analysis(&self, chat_id: i64, title: &str) -> Result<()> {
        if title.is_empty() {
            return self
                .send_text(chat_id, &missing_title_message("analysis"))
                .await;
        }
        let Some(detail) = self.lookup(chat_id, title).await? else {
            return Ok(());
        };

        let reply = match self.services.narrative.analyze_content(&detail).await {
            Ok(analysis) => analysis_message(&detail, &analysis),
            Err(e) => {
                tracing::debug!(reason = %e.reason, "using analysis fallback");
                analysis_fallback_message(&detail)
            }
        };
        self.send_markdown(chat_id, &reply).await
    }

    /// Sends the progress notice and resolves `title`.
    ///
    /// Returns `None` after answering the user when the lookup failed.
    async fn lookup(&self, chat_id: i64, title: &str) -> Result<Option<DetailRecord>> {
        self.send_text(chat_id, &searching_message(title)).await?;

        match self.services.catalog.resolve(title).await {
            Ok(detail) => Ok(Some(detail)),
            Err(LookupError::NotFound { query }) => {
                tracing::info!(query = %query, "title not found");
                self.send_text(chat_id, &not_found_message(title)).await?;
                Ok(None)
            }
            Err(e @ LookupError::Retrieval(_)) => {
                tracing::warn!(error = %e, "catalog lookup failed");
                self.send_text(chat_id, retrieval_error_message()).await?;
                Ok(None)
            }
        }
    }

    /// Renders and uploads the chart; failures are logged and skipped.
    async fn send_chart(
        &self,
        chat_id: i64,
        detail: &DetailRecord,
        plan: MarathonPlan,
        request_id: RequestId,
    ) -> Result<()> {
        let renderer = self.services.charts.clone();
        let title = detail.title.clone();
        let rendered =
            tokio::task::spawn_blocking(move || renderer.render(&plan, &title, request_id))
                .await
                .context("chart rendering task failed")?;

        let path = match rendered {
            Ok(path) => path,
            Err(RenderError::EmptyPlan) => {
                tracing::debug!("nothing to chart");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "chart skipped");
                return Ok(());
            }
        };

        let sent = self
            .telegram
            .send_document(chat_id, &path, Some(detail.title.as_str()))
            .await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(path = %path.display(), error = %e, "failed to remove chart");
        }
        sent.map(|_| ()).context("failed to send chart")
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.telegram
            .send_message(&SendMessageParams::new(chat_id, text))
            .await
            .map(|_| ())
            .context("failed to send message")
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.telegram
            .send_message(&SendMessageParams::new(chat_id, text).parse_mode(ParseMode::Markdown))
            .await
            .map(|_| ())
            .context("failed to send message")
    }
}
