//! Fits a viewing session into a limited time budget.

use crate::error::AdjustError;
use crate::normalize::{DetailRecord, MediaKind};

/// What the session covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitSummary {
    /// Series: this many full episodes fit.
    Episodes(u32),
    /// Series: not even one episode plus its pause fits.
    NoEpisodeFits,
    /// Movie: the whole film plus its pause fits.
    WholeMovie,
    /// Movie: only part fits; `remaining` minutes are left for later.
    PartialMovie {
        /// Minutes of the film left unwatched.
        remaining: u32,
    },
}

/// A session fitted into `available_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFit {
    /// Budget supplied by the user.
    pub available_minutes: u32,
    /// Minutes spent watching.
    pub watch_minutes: u32,
    /// Minutes spent on pauses.
    pub pause_minutes: u32,
    /// Outcome.
    pub summary: FitSummary,
}

/// Fits `detail` into `available_minutes`, with `pause_per_unit` minutes of
/// break after each unit.
///
/// # Errors
///
/// Returns [`AdjustError::NoAvailableTime`] when `available_minutes` is 0.
pub fn adjust(
    detail: &DetailRecord,
    available_minutes: u32,
    pause_per_unit: u32,
) -> Result<SessionFit, AdjustError> {
    if available_minutes == 0 {
        return Err(AdjustError::NoAvailableTime);
    }

    let fit = match detail.media_kind {
        MediaKind::Series => fit_series(detail, available_minutes, pause_per_unit),
        MediaKind::Movie => fit_movie(detail, available_minutes, pause_per_unit),
    };
    Ok(fit)
}

fn fit_series(detail: &DetailRecord, available: u32, pause: u32) -> SessionFit {
    let per_episode = detail.unit_minutes.saturating_add(pause);
    let mut episodes = available.checked_div(per_episode).unwrap_or(0);
    if detail.unit_count > 0 {
        episodes = episodes.min(detail.unit_count);
    }

    SessionFit {
        available_minutes: available,
        watch_minutes: episodes.saturating_mul(detail.unit_minutes),
        pause_minutes: episodes.saturating_mul(pause),
        summary: if episodes == 0 {
            FitSummary::NoEpisodeFits
        } else {
            FitSummary::Episodes(episodes)
        },
    }
}

fn fit_movie(detail: &DetailRecord, available: u32, pause: u32) -> SessionFit {
    if available >= detail.unit_minutes.saturating_add(pause) {
        return SessionFit {
            available_minutes: available,
            watch_minutes: detail.unit_minutes,
            pause_minutes: pause,
            summary: FitSummary::WholeMovie,
        };
    }

    let pause_minutes = pause.min(available);
    let watch_minutes = available.saturating_sub(pause_minutes);
    SessionFit {
        available_minutes: available,
        watch_minutes,
        pause_minutes,
        summary: FitSummary::PartialMovie {
            remaining: detail.unit_minutes.saturating_sub(watch_minutes),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::planner::DEFAULT_PAUSE_MINUTES;

    fn record(kind: MediaKind, unit_minutes: u32, unit_count: u32) -> DetailRecord {
        DetailRecord {
            title: String::from("Test"),
            media_kind: kind,
            synopsis: String::new(),
            unit_minutes,
            unit_count,
        }
    }

    #[test]
    fn test_series_fits_whole_episodes() {
        // Arrange
        let detail = record(MediaKind::Series, 50, 10);

        // Act
        let fit = adjust(&detail, 180, DEFAULT_PAUSE_MINUTES).unwrap();

        // Assert
        assert_eq!(fit.summary, FitSummary::Episodes(3));
        assert_eq!(fit.watch_minutes, 150);
        assert_eq!(fit.pause_minutes, 30);
    }

    #[test]
    fn test_series_capped_at_episode_total() {
        let detail = record(MediaKind::Series, 20, 4);
        let fit = adjust(&detail, 600, DEFAULT_PAUSE_MINUTES).unwrap();
        assert_eq!(fit.summary, FitSummary::Episodes(4));
        assert_eq!(fit.watch_minutes, 80);
    }

    #[test]
    fn test_series_unknown_total_is_not_capped() {
        let detail = record(MediaKind::Series, 20, 0);
        let fit = adjust(&detail, 600, DEFAULT_PAUSE_MINUTES).unwrap();
        assert_eq!(fit.summary, FitSummary::Episodes(20));
    }

    #[test]
    fn test_series_budget_too_small() {
        // Arrange
        let detail = record(MediaKind::Series, 45, 62);

        // Act
        let fit = adjust(&detail, 54, DEFAULT_PAUSE_MINUTES).unwrap();

        // Assert
        assert_eq!(fit.summary, FitSummary::NoEpisodeFits);
        assert_eq!((fit.watch_minutes, fit.pause_minutes), (0, 0));
    }

    #[test]
    fn test_movie_fits() {
        let detail = record(MediaKind::Movie, 120, 1);
        let fit = adjust(&detail, 130, DEFAULT_PAUSE_MINUTES).unwrap();
        assert_eq!(fit.summary, FitSummary::WholeMovie);
        assert_eq!((fit.watch_minutes, fit.pause_minutes), (120, 10));
    }

    #[test]
    fn test_movie_partial() {
        // Arrange
        let detail = record(MediaKind::Movie, 195, 1);

        // Act
        let fit = adjust(&detail, 90, DEFAULT_PAUSE_MINUTES).unwrap();

        // Assert
        assert_eq!(fit.watch_minutes, 80);
        assert_eq!(fit.pause_minutes, 10);
        assert_eq!(fit.summary, FitSummary::PartialMovie { remaining: 115 });
    }

    #[test]
    fn test_movie_budget_shorter_than_pause() {
        let detail = record(MediaKind::Movie, 100, 1);
        let fit = adjust(&detail, 5, DEFAULT_PAUSE_MINUTES).unwrap();
        assert_eq!((fit.watch_minutes, fit.pause_minutes), (0, 5));
        assert_eq!(fit.summary, FitSummary::PartialMovie { remaining: 100 });
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let detail = record(MediaKind::Movie, 100, 1);
        assert_eq!(
            adjust(&detail, 0, DEFAULT_PAUSE_MINUTES),
            Err(AdjustError::NoAvailableTime)
        );
    }
}
