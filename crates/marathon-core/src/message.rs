//! Chat reply templates, formatted for Telegram's legacy `Markdown` mode.
//!
//! Catalog text is sanitized before interpolation so stray emphasis markers
//! cannot break parsing.

use crate::adjust::{FitSummary, SessionFit};
use crate::markdown::sanitize_markdown;
use crate::normalize::{DetailRecord, MediaKind};
use crate::planner::MarathonPlan;

/// Synopsis length shown in plan replies, in characters.
pub const SYNOPSIS_PREVIEW_CHARS: usize = 150;

/// Greeting for `/start`.
#[must_use]
pub const fn start_message() -> &'static str {
    "Hi! I am MarathonBot 🎬\n\
     I help you organize movie and series marathons.\n\
     Use /help to see what I can do."
}

/// Command list for `/help`.
#[must_use]
pub const fn help_message() -> &'static str {
    "🤖 *Available commands*\n\n\
     🔹 /plan <title>\n   Total marathon time plus a chart.\n\
     🔹 /adjust <title>, <minutes>\n   How much fits in your free time.\n\
     🔹 /analysis <title>\n   Tone, themes and audience.\n\
     🔹 /help\n   This message.\n\n\
     Examples:\n\
     /plan Breaking Bad\n\
     /adjust Titanic, 120\n\
     /analysis The Office"
}

/// Reply to unrecognized commands.
#[must_use]
pub const fn unknown_command_message() -> &'static str {
    "🤔 I don't know that command. Use /help to see the list."
}

/// Reply when a command needs a title and got none.
#[must_use]
pub fn missing_title_message(command: &str) -> String {
    format!("⚠️ Please write the name of the movie or series.\nExample: /{command} Titanic")
}

/// Reply when `/adjust` arguments are not `<title>, <minutes>`.
#[must_use]
pub const fn adjust_usage_message() -> &'static str {
    "⚠️ Wrong format. Use: /adjust <title>, <minutes>\nExample: /adjust Friends, 60"
}

/// Reply when the minutes of `/adjust` are not a positive number.
#[must_use]
pub const fn invalid_minutes_message() -> &'static str {
    "⚠️ The minutes must be a positive whole number.\nExample: /adjust Friends, 60"
}

/// Progress notice sent before a catalog lookup.
#[must_use]
pub fn searching_message(query: &str) -> String {
    format!("🔍 Searching for '{query}'...")
}

/// Reply when the catalog has no movie or series for `query`.
#[must_use]
pub fn not_found_message(query: &str) -> String {
    format!(
        "❌ I found nothing called '{query}'. Try the original title or check the spelling."
    )
}

/// Reply when the catalog could not be reached.
#[must_use]
pub const fn retrieval_error_message() -> &'static str {
    "❌ I could not reach the movie catalog right now. Please try again later."
}

/// Templated plan reply.
#[must_use]
pub fn plan_message(detail: &DetailRecord, plan: &MarathonPlan) -> String {
    format!(
        "🎬 *Marathon plan: {title}*\n\
         📝 Synopsis: {synopsis}\n\n\
         ⏱ *Details*\n\
         - Type: {kind}\n\
         - Episodes: {count}\n\
         - Unit length: {unit} min\n\n\
         📊 *Realistic estimate*\n\
         - Screen time: {screen} min\n\
         - Pauses (snacks, breaks): {pause} min\n\
         ----------------------------------\n\
         🏆 *TOTAL: {hours:.1} HOURS*",
        title = sanitize_markdown(&detail.title),
        synopsis = preview(&sanitize_markdown(&detail.synopsis)),
        kind = detail.media_kind,
        count = unit_count_label(detail),
        unit = detail.unit_minutes,
        screen = plan.screen_minutes,
        pause = plan.pause_minutes,
        hours = plan.total_hours,
    )
}

/// Plan reply wrapping LLM-written text.
///
/// `narrative` must already be sanitized.
#[must_use]
pub fn plan_narrative_message(
    detail: &DetailRecord,
    plan: &MarathonPlan,
    narrative: &str,
) -> String {
    format!(
        "🎬 *Marathon plan: {title}*\n\n{narrative}\n\n🏆 *TOTAL: {hours:.1} HOURS*",
        title = sanitize_markdown(&detail.title),
        hours = plan.total_hours,
    )
}

/// Session adjustment reply.
#[must_use]
pub fn adjust_message(detail: &DetailRecord, fit: &SessionFit) -> String {
    let mut message = format!(
        "⚖️ *Adjusted session: {title}*\n\
         ⏳ You have: {available} min\n\n\
         📺 *Watch:* {watch} min\n\
         ⏸ *Pauses:* {pause} min\n\
         ---------------------------\n\
         📝 {summary}",
        title = sanitize_markdown(&detail.title),
        available = fit.available_minutes,
        watch = fit.watch_minutes,
        pause = fit.pause_minutes,
        summary = fit_summary(fit),
    );
    if let FitSummary::Episodes(episodes) = fit.summary {
        message.push_str(&format!("\n(That is {episodes} full episodes)"));
    }
    message
}

/// Analysis reply wrapping LLM-written text.
///
/// `analysis` must already be sanitized.
#[must_use]
pub fn analysis_message(detail: &DetailRecord, analysis: &str) -> String {
    format!(
        "🧠 *Analysis: {title}*\n\n{analysis}",
        title = sanitize_markdown(&detail.title)
    )
}

/// Analysis reply used when generation is unavailable.
#[must_use]
pub fn analysis_fallback_message(detail: &DetailRecord) -> String {
    format!(
        "🧠 *Analysis: {title}*\n\n\
         The analysis is not available right now. Here is the synopsis:\n\n{synopsis}",
        title = sanitize_markdown(&detail.title),
        synopsis = sanitize_markdown(&detail.synopsis),
    )
}

/// One-line summary of a fitted session.
#[must_use]
pub fn fit_summary(fit: &SessionFit) -> String {
    match fit.summary {
        FitSummary::Episodes(1) => String::from("You can watch 1 full episode."),
        FitSummary::Episodes(n) => format!("You can watch {n} full episodes."),
        FitSummary::NoEpisodeFits => {
            String::from("Not enough time for one full episode plus its pause.")
        }
        FitSummary::WholeMovie => String::from("The whole movie fits, pause included."),
        FitSummary::PartialMovie { remaining } => format!(
            "Watch the first {} min; {remaining} min are left for another session.",
            fit.watch_minutes
        ),
    }
}

fn unit_count_label(detail: &DetailRecord) -> String {
    match detail.media_kind {
        MediaKind::Series if detail.unit_count == 0 => String::from("unknown"),
        _ => detail.unit_count.to_string(),
    }
}

/// First [`SYNOPSIS_PREVIEW_CHARS`] characters, with an ellipsis when cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(SYNOPSIS_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", text.get(..cut).unwrap_or(text).trim_end()),
        None => text.to_owned(),
    }
}
