//! Chat command parsing.

/// A recognized chat command and its raw argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`.
    Start,
    /// `/help`, `/ayuda`.
    Help,
    /// `/plan`, `/planear`.
    Plan(String),
    /// `/adjust`, `/ajustar`.
    Adjust(String),
    /// `/analysis`, `/analisis`, `/análisis`.
    Analysis(String),
    /// Any other `/command`.
    Unknown(String),
}

impl Command {
    /// Parses a message text.
    ///
    /// Returns `None` for text that is not a command, and for commands
    /// addressed to another bot with a `/command@otherbot` suffix. A suffix
    /// naming `bot_username` is ignored, as is case. When `bot_username` is
    /// unknown every suffix is accepted.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;
        let (head, args) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        let (name, addressee) = head.split_once('@').unwrap_or((head, ""));
        if let Some(own) = bot_username
            && !addressee.is_empty()
            && !addressee.eq_ignore_ascii_case(own)
        {
            return None;
        }
        let name = name.to_lowercase();
        let args = args.trim().to_owned();

        let command = match name.as_str() {
            "start" => Self::Start,
            "help" | "ayuda" => Self::Help,
            "plan" | "planear" => Self::Plan(args),
            "adjust" | "ajustar" => Self::Adjust(args),
            "analysis" | "analisis" | "análisis" => Self::Analysis(args),
            _ => Self::Unknown(name),
        };
        Some(command)
    }
}

/// Invalid `/adjust` arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// No `,` between title and minutes.
    #[error("expected `<title>, <minutes>`")]
    MissingSeparator,
    /// Empty title before the separator.
    #[error("title is empty")]
    MissingTitle,
    /// Minutes are not a positive whole number.
    #[error("minutes must be a positive whole number, got {0:?}")]
    InvalidMinutes(String),
}

/// Splits `/adjust` arguments into title and available minutes.
///
/// The split happens at the last comma, so titles may contain commas.
///
/// # Errors
///
/// Returns [`InputError`] when the separator or title is missing, or the
/// minutes are not a positive whole number.
pub fn parse_adjust_args(args: &str) -> Result<(String, u32), InputError> {
    let (title, minutes) = args.rsplit_once(',').ok_or(InputError::MissingSeparator)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(InputError::MissingTitle);
    }
    let minutes_text = minutes.trim();
    let minutes = minutes_text
        .parse::<u32>()
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| InputError::InvalidMinutes(minutes_text.to_owned()))?;
    Ok((title.to_owned(), minutes))
}
