//! Markdown cleanup for text sent with Telegram's legacy `Markdown` mode.
//!
//! Generated text and catalog strings may contain emphasis markers or code
//! fences that leave the message unparseable, so they are stripped before
//! interpolation.

use std::sync::LazyLock;

use regex::Regex;

/// Code fence lines, including an optional language tag.
#[allow(clippy::expect_used)]
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[^\n]*\n?").expect("failed to compile fence regex"));

/// Heading markers at the start of a line.
#[allow(clippy::expect_used)]
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").expect("failed to compile heading regex")
});

/// Emphasis markers and inline code backticks.
#[allow(clippy::expect_used)]
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`]").expect("failed to compile marker regex"));

/// Two or more consecutive blank lines.
#[allow(clippy::expect_used)]
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:[ \t]*\n){2,}").expect("failed to compile blank line regex")
});

/// Strips code fences, backticks, `*`/`_` emphasis and heading markers, and
/// collapses runs of blank lines into one.
#[must_use]
pub fn sanitize_markdown(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = FENCE_RE.replace_all(&text, "");
    let text = HEADING_RE.replace_all(&text, "");
    let text = MARKER_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_owned()
}
