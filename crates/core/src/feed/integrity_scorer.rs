use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

use super::feed_model::{BadgeThresholds, FeedEntry, IntegrityScore};
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{local_date, trailing_window};

/// Scores check-in histories over a trailing window of local calendar days.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityScorer {
    window_days: u32,
    thresholds: BadgeThresholds,
}

impl IntegrityScorer {
    pub fn new(window_days: u32, thresholds: BadgeThresholds) -> Result<Self> {
        if window_days == 0 {
            return Err(ValidationError::InvalidInput(
                "Consistency window must be at least one day".to_string(),
            )
            .into());
        }
        thresholds.validate()?;
        Ok(Self {
            window_days,
            thresholds,
        })
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Counts the distinct days in `[today - window_days + 1, today]` that
    /// have at least one check-in. Several check-ins on one day count once.
    pub fn score<Tz, I>(&self, check_in_times: I, today: NaiveDate, tz: &Tz) -> IntegrityScore
    where
        Tz: TimeZone,
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let active_days = match trailing_window(today, self.window_days) {
            Some((first_day, last_day)) => check_in_times
                .into_iter()
                .map(|instant| local_date(instant, tz))
                .filter(|day| *day >= first_day && *day <= last_day)
                .collect::<HashSet<_>>()
                .len() as u32,
            None => 0,
        };

        let consistency_rate = consistency_rate(active_days, self.window_days);
        IntegrityScore {
            consistency_rate,
            active_days,
            badge: self.thresholds.badge_for(consistency_rate),
        }
    }
}

/// `round(100 * active_days / window_days)`, clamped to 100.
pub fn consistency_rate(active_days: u32, window_days: u32) -> u8 {
    if window_days == 0 {
        return 0;
    }
    let active = u64::from(active_days.min(window_days));
    let window = u64::from(window_days);
    ((200 * active + window) / (2 * window)).min(100) as u8
}

/// Scores with the default badge thresholds.
pub fn score<Tz, I>(
    check_in_times: I,
    today: NaiveDate,
    tz: &Tz,
    window_days: u32,
) -> Result<IntegrityScore>
where
    Tz: TimeZone,
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let scorer = IntegrityScorer::new(window_days, BadgeThresholds::default())?;
    Ok(scorer.score(check_in_times, today, tz))
}

/// Sorts by consistency rate, then current streak, then recency, all
/// descending. Likes never influence the order.
pub fn rank_feed(entries: &mut [FeedEntry]) {
    entries.sort_by(|a, b| {
        b.consistency_rate
            .cmp(&a.consistency_rate)
            .then_with(|| b.current_streak.cmp(&a.current_streak))
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.check_in_id.cmp(&b.check_in_id))
    });
}
