//! Check-in window domain models.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::constants::{DEFAULT_WINDOW_END, DEFAULT_WINDOW_START};
use crate::errors::{Result, ValidationError, WindowError};

/// Daily time range `[start, end)` during which check-ins are accepted.
///
/// Construction guarantees `start < end`, so a window can never silently be
/// always-open or always-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl CheckInWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(WindowError::InvalidWindow { start, end }.into());
        }
        Ok(Self { start, end })
    }

    /// Parses `HH:MM` (or `HH:MM:SS`) times of day.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Start inclusive, end exclusive.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

impl Default for CheckInWindow {
    fn default() -> Self {
        Self {
            start: time_of_day(DEFAULT_WINDOW_START),
            end: time_of_day(DEFAULT_WINDOW_END),
        }
    }
}

impl Serialize for CheckInWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CheckInWindow", 2)?;
        state.serialize_field("start", &format_time_of_day(self.start))?;
        state.serialize_field("end", &format_time_of_day(self.end))?;
        state.end()
    }
}

/// Whether the window is open at a given instant and how long until that changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub is_open: bool,
    /// Until the window closes when open, until it next opens when closed.
    pub time_remaining: Duration,
}

impl WindowState {
    pub fn seconds_remaining(&self) -> i64 {
        self.time_remaining.num_seconds()
    }

    /// True when the window is open and closes in less than `threshold`.
    pub fn closes_within(&self, threshold: Duration) -> bool {
        self.is_open && self.time_remaining < threshold
    }
}

fn time_of_day((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            ValidationError::InvalidInput(format!("'{}' is not a valid time of day", value)).into()
        })
}

fn format_time_of_day(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}
