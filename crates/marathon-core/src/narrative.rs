//! LLM-written replies with a deterministic fallback.
//!
//! Every failure mode (generation disabled, transport error, quota, blocked
//! prompt, empty candidate) collapses into [`GenerationUnavailable`]; callers
//! answer with a templated message instead.

use marathon_api::gemini::{GeminiApi, GenerateContentRequest, GenerationConfig};
use tracing::instrument;

use crate::error::GenerationUnavailable;
use crate::markdown::sanitize_markdown;
use crate::normalize::DetailRecord;
use crate::planner::MarathonPlan;

/// System instruction for plan descriptions.
const PLAN_INSTRUCTION: &str = "You help people plan movie and series marathons. \
Given a title, its synopsis and the computed watch time, write a short, upbeat \
paragraph (at most 120 words) describing the marathon and one practical tip. \
Use the numbers exactly as given. Write in the language of the synopsis. \
Do not use headings, tables or code blocks.";

/// System instruction for content analysis.
const ANALYSIS_INSTRUCTION: &str = "You are a film critic. From the synopsis, \
describe the tone, the main themes and the audience it suits best, in at most \
150 words. Do not reveal plot twists. Write in the language of the synopsis. \
Do not use headings, tables or code blocks.";

/// Sampling temperature for all requests.
const TEMPERATURE: f32 = 0.7;

/// Output token cap for all requests.
const MAX_OUTPUT_TOKENS: u32 = 1_024;

/// Writes plan descriptions and content analyses through an optional
/// text-generation client.
#[derive(Debug)]
pub struct NarrativeWriter<G> {
    generator: Option<G>,
}

impl<G: GeminiApi + Sync> NarrativeWriter<G> {
    /// Writer backed by `generator`.
    pub const fn new(generator: G) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Writer that always reports [`GenerationUnavailable`].
    #[must_use]
    pub const fn disabled() -> Self {
        Self { generator: None }
    }

    /// Whether a generator is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Describes the marathon for `detail` and `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationUnavailable`] whenever no usable text was produced.
    #[instrument(skip_all, fields(title = %detail.title))]
    pub async fn describe_plan(
        &self,
        detail: &DetailRecord,
        plan: &MarathonPlan,
    ) -> Result<String, GenerationUnavailable> {
        self.generate(PLAN_INSTRUCTION, plan_prompt(detail, plan))
            .await
    }

    /// Analyzes tone, themes and audience of `detail`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationUnavailable`] whenever no usable text was produced.
    #[instrument(skip_all, fields(title = %detail.title))]
    pub async fn analyze_content(
        &self,
        detail: &DetailRecord,
    ) -> Result<String, GenerationUnavailable> {
        self.generate(ANALYSIS_INSTRUCTION, analysis_prompt(detail))
            .await
    }

    async fn generate(
        &self,
        instruction: &str,
        prompt: String,
    ) -> Result<String, GenerationUnavailable> {
        let Some(generator) = self.generator.as_ref() else {
            tracing::debug!("text generation disabled");
            return Err(GenerationUnavailable::new("generation disabled"));
        };

        let request = GenerateContentRequest::new(prompt)
            .system_instruction(instruction)
            .generation_config(GenerationConfig {
                temperature: Some(TEMPERATURE),
                max_output_tokens: Some(MAX_OUTPUT_TOKENS),
            });

        let response = match generator.generate_content(&request).await {
            Ok(response) => response,
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(error = %reason, "text generation failed");
                return Err(GenerationUnavailable::new(reason));
            }
        };

        if let Some(reason) = response.block_reason() {
            tracing::warn!(reason, "prompt blocked");
            return Err(GenerationUnavailable::new(format!("prompt blocked: {reason}")));
        }

        let text = response
            .text()
            .map(|text| sanitize_markdown(&text))
            .filter(|text| !text.is_empty());
        text.ok_or_else(|| {
            tracing::warn!("empty candidate");
            GenerationUnavailable::new("empty candidate")
        })
    }
}

/// User prompt for a plan description.
fn plan_prompt(detail: &DetailRecord, plan: &MarathonPlan) -> String {
    let count = if detail.has_unknown_count() {
        String::from("unknown")
    } else {
        detail.unit_count.to_string()
    };
    format!(
        "Title: {title}\nType: {kind}\nSynopsis: {synopsis}\nUnits: {count}\n\
         Minutes per unit: {unit}\nScreen time: {screen} min\n\
         Pause time: {pause} min\nTotal: {hours} hours",
        title = detail.title,
        kind = detail.media_kind,
        synopsis = detail.synopsis,
        unit = detail.unit_minutes,
        screen = plan.screen_minutes,
        pause = plan.pause_minutes,
        hours = plan.total_hours,
    )
}

/// User prompt for a content analysis.
fn analysis_prompt(detail: &DetailRecord) -> String {
    format!(
        "Title: {}\nType: {}\nSynopsis: {}",
        detail.title, detail.media_kind, detail.synopsis
    )
}
