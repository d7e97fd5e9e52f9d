//! `GeminiClient` - Gemini `generateContent` client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::GeminiApi;
use super::types::{GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for a single generation call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini API client bound to one model.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct GeminiClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key, sent as `x-goog-api-key`.
    api_key: String,
    /// Model name (e.g. `gemini-2.5-flash`).
    model: String,
}

/// Builder for `GeminiClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct GeminiClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    model: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: None,
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

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model (default: `gemini-2.5-flash`).
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(GeminiClient {
            http_client,
            base_url,
            api_key,
            model: self.model.unwrap_or_else(|| String::from(DEFAULT_MODEL)),
        })
    }
}

impl GeminiClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Model this client generates with.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GeminiApi for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let path = format!("models/{}:generateContent", self.model);
        let url = self
            .base_url
            .join(&path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        tracing::debug!(url = %url, "Gemini API request");

        let result = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                bail!(
                    "Gemini API error (HTTP {}): status={}, message={}",
                    status,
                    error_response.error.status,
                    error_response.error.message,
                );
            }
            bail!("Gemini API error (HTTP {status}): {body}");
        }

        serde_json::from_str(&body)
            .with_context(|| format!("failed to decode JSON response: {path}"))
    }
}
