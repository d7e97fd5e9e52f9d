//! Watch-time arithmetic for a full marathon.

/// Break taken after each unit, in minutes.
pub const DEFAULT_PAUSE_MINUTES: u32 = 10;

/// Time needed to watch every unit back to back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarathonPlan {
    /// `unit_minutes × unit_count`.
    pub screen_minutes: u32,
    /// `pause_per_unit × unit_count`.
    pub pause_minutes: u32,
    /// Screen plus pause.
    pub total_minutes: u32,
    /// Total in hours, rounded to one decimal.
    pub total_hours: f64,
}

impl MarathonPlan {
    /// Whether there is nothing to watch.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_minutes == 0
    }
}

/// Computes the plan for `unit_count` units of `unit_minutes` each.
///
/// Saturates at `u32::MAX` instead of overflowing.
#[must_use]
pub fn plan(unit_minutes: u32, unit_count: u32, pause_per_unit: u32) -> MarathonPlan {
    let screen_minutes = unit_minutes.saturating_mul(unit_count);
    let pause_minutes = pause_per_unit.saturating_mul(unit_count);
    let total_minutes = screen_minutes.saturating_add(pause_minutes);

    MarathonPlan {
        screen_minutes,
        pause_minutes,
        total_minutes,
        total_hours: minutes_to_hours(total_minutes),
    }
}

/// Minutes to hours, rounded to one decimal.
///
/// Rounds the exact quotient with ties to even, so 135 min is 2.2 h.
#[must_use]
pub fn minutes_to_hours(minutes: u32) -> f64 {
    let hours = f64::from(minutes) / 60.0;
    format!("{hours:.1}").parse().unwrap_or(hours)
}
