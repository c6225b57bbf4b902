use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Converts a UTC instant to the calendar day it falls on in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Signed number of calendar days from `earlier` to `later`.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// The inclusive range of `days` calendar days ending on `today`.
///
/// Returns `None` for a zero-length window.
pub fn trailing_window(today: NaiveDate, days: u32) -> Option<(NaiveDate, NaiveDate)> {
    if days == 0 {
        return None;
    }
    let start = today - Duration::days(i64::from(days) - 1);
    Some((start, today))
}
