//! `TelegramClient` - Telegram Bot API client implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::TelegramApi;
use super::types::{
    GetUpdatesParams, Message, SendMessageParams, TelegramResponse, Update, User,
};

/// Default base URL for the Bot API.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org/";

/// Default timeout for non-polling calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack added on top of the long-polling timeout for `getUpdates`.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram Bot API client.
///
/// The bot token is part of every request path, so URLs are never logged.
#[allow(clippy::module_name_repetitions)]
pub struct TelegramClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bot token.
    token: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for `TelegramClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TelegramClientBuilder {
    base_url: Option<Url>,
    token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TelegramClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the bot token (required).
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the timeout for non-polling calls (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TelegramClient> {
        let token = self.token.context("token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(TelegramClient {
            http_client,
            base_url,
            token,
        })
    }
}

impl TelegramClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TelegramClientBuilder {
        TelegramClientBuilder::new()
    }

    /// Resolves `bot<token>/<method>`.
    fn method_url(&self, method: &str) -> Result<Url> {
        // Leading "./" keeps "bot123:ABC" from parsing as a URL scheme.
        self.base_url
            .join(&format!("./bot{}/{method}", self.token))
            .with_context(|| format!("failed to build Bot API URL for {method}"))
    }

    /// Unwraps the `{ok, result}` envelope.
    async fn decode<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to read response body: {method}"))?;

        let envelope: TelegramResponse<T> = serde_json::from_str(&body)
            .with_context(|| format!("failed to decode Bot API response: {method} (HTTP {status})"))?;

        if !envelope.ok {
            bail!(
                "Telegram API error (HTTP {}): code={}, description={}",
                status,
                envelope
                    .error_code
                    .map_or_else(|| String::from("-"), |c| c.to_string()),
                envelope.description.as_deref().unwrap_or("-"),
            );
        }

        envelope
            .result
            .with_context(|| format!("Bot API response has no result: {method}"))
    }

    /// Sends a JSON POST to a Bot API method.
    async fn post_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let url = self.method_url(method)?;
        tracing::debug!(method, "Telegram API request");

        let mut request = self.http_client.post(url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("request failed: {method}"))?;
        Self::decode(method, response).await
    }
}

/// Guesses the upload MIME type from the file extension.
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

impl TelegramApi for TelegramClient {
    #[instrument(skip_all)]
    async fn get_me(&self) -> Result<User> {
        self.post_json("getMe", &serde_json::Map::new(), None).await
    }

    #[instrument(skip_all, fields(offset = ?offset))]
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u32) -> Result<Vec<Update>> {
        let params = GetUpdatesParams::new(offset, timeout_secs);
        let timeout = Duration::from_secs(u64::from(timeout_secs)).saturating_add(POLL_GRACE);
        self.post_json("getUpdates", &params, Some(timeout)).await
    }

    #[instrument(skip_all, fields(chat_id = params.chat_id))]
    async fn send_message(&self, params: &SendMessageParams) -> Result<Message> {
        self.post_json("sendMessage", params, None).await
    }

    #[instrument(skip_all, fields(chat_id = chat_id))]
    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        caption: Option<&str>,
    ) -> Result<Message> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| String::from("document"), String::from);

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .context("invalid MIME type")?;
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);
        if let Some(caption) = caption {
            form = form.text("caption", String::from(caption));
        }

        let url = self.method_url("sendDocument")?;
        tracing::debug!(method = "sendDocument", path = %path.display(), "Telegram API request");

        let response = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("request failed: sendDocument")?;
        Self::decode("sendDocument", response).await
    }
}
