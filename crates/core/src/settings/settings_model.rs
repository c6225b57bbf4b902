//! Check-in engine settings.

use chrono::Duration;
use chrono_tz::Tz;

use crate::constants::{
    DEFAULT_CONSISTENCY_WINDOW_DAYS, DEFAULT_FEED_LIMIT, DEFAULT_STREAK_RISK_MINUTES,
};
use crate::errors::{Result, ValidationError};
use crate::feed::BadgeThresholds;
use crate::window::CheckInWindow;

/// Upper bound on any requested feed size.
pub const MAX_FEED_LIMIT: usize = 100;

/// Engine configuration shared by the check-in, goal and feed services.
///
/// Built once at startup; `validate` must pass before services use it.
#[derive(Debug, Clone)]
pub struct CheckInSettings {
    pub window: CheckInWindow,
    /// Zone in which calendar days and the window are evaluated.
    pub timezone: Tz,
    pub enforce_window: bool,
    pub consistency_window_days: u32,
    pub badge_thresholds: BadgeThresholds,
    pub feed_limit: usize,
    pub streak_risk_threshold: Duration,
}

impl Default for CheckInSettings {
    fn default() -> Self {
        Self {
            window: CheckInWindow::default(),
            timezone: Tz::UTC,
            enforce_window: true,
            consistency_window_days: DEFAULT_CONSISTENCY_WINDOW_DAYS,
            badge_thresholds: BadgeThresholds::default(),
            feed_limit: DEFAULT_FEED_LIMIT,
            streak_risk_threshold: Duration::minutes(DEFAULT_STREAK_RISK_MINUTES),
        }
    }
}

impl CheckInSettings {
    pub fn validate(&self) -> Result<()> {
        if self.consistency_window_days == 0 {
            return Err(ValidationError::InvalidInput(
                "Consistency window must be at least one day".to_string(),
            )
            .into());
        }
        self.badge_thresholds.validate()?;
        if self.feed_limit == 0 || self.feed_limit > MAX_FEED_LIMIT {
            return Err(ValidationError::InvalidInput(format!(
                "Feed limit must be between 1 and {}",
                MAX_FEED_LIMIT
            ))
            .into());
        }
        if self.streak_risk_threshold < Duration::zero() {
            return Err(ValidationError::InvalidInput(
                "Streak risk threshold cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Parses an IANA zone name such as `Europe/Berlin`.
    pub fn parse_timezone(name: &str) -> Result<Tz> {
        name.trim().parse::<Tz>().map_err(|_| {
            ValidationError::InvalidInput(format!("Unknown timezone '{}'", name)).into()
        })
    }

    /// The window that bounds check-ins, or `None` when it is not enforced.
    pub fn enforced_window(&self) -> Option<&CheckInWindow> {
        self.enforce_window.then_some(&self.window)
    }

    /// Requested feed size, falling back to the configured default.
    pub fn feed_limit_for(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|limit| *limit > 0)
            .unwrap_or(self.feed_limit)
            .min(MAX_FEED_LIMIT)
    }
}
