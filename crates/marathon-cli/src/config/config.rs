//! `AppConfig` struct and TOML read/write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB lookup settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Text generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Chart output settings.
    #[serde(default)]
    pub chart: ChartConfig,
    /// Telegram polling settings.
    #[serde(default)]
    pub bot: BotConfig,
    /// Marathon arithmetic settings.
    #[serde(default)]
    pub plan: PlanConfig,
}

/// TMDB lookup configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Response language (e.g. `es-ES`).
    pub language: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            language: String::from(marathon_core::catalog::DEFAULT_LANGUAGE),
            timeout_secs: 15,
        }
    }
}

/// Text generation configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Use the LLM when `GEMINI_API_KEY` is set.
    pub enabled: bool,
    /// Gemini model name.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: String::from(marathon_api::gemini::DEFAULT_MODEL),
            timeout_secs: 30,
        }
    }
}

/// Chart output configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    /// Directory for chart files (default: `<temp dir>/marathon`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl ChartConfig {
    /// Configured directory, or `<temp dir>/marathon`.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("marathon"))
    }
}

/// Telegram polling configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Long-polling timeout in seconds.
    pub poll_timeout_secs: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 30,
        }
    }
}

/// Marathon arithmetic configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlanConfig {
    /// Break after each episode or movie, in minutes.
    pub pause_minutes: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            pause_minutes: marathon_core::DEFAULT_PAUSE_MINUTES,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Rejects settings that would make every request fail.
    fn validate(&self) -> Result<()> {
        if self.catalog.language.trim().is_empty() {
            bail!("catalog.language must not be empty");
        }
        if self.catalog.timeout_secs == 0 || self.generation.timeout_secs == 0 {
            bail!("timeouts must be at least 1 second");
        }
        if self.generation.model.trim().is_empty() {
            bail!("generation.model must not be empty");
        }
        Ok(())
    }

    /// TMDB request timeout.
    #[must_use]
    pub const fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    /// Gemini request timeout.
    #[must_use]
    pub const fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation.timeout_secs)
    }
}
