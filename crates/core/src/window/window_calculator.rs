use chrono::{DateTime, Duration, NaiveTime, TimeZone};

use super::window_model::{CheckInWindow, WindowState};
use crate::errors::Result;

/// Computes the window state at `now` for a `[window_start, window_end)` range.
///
/// Times of day are compared in `now`'s own timezone. Fails fast with
/// `WindowError::InvalidWindow` when `window_start >= window_end`.
pub fn compute_window_state<Tz: TimeZone>(
    now: &DateTime<Tz>,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> Result<WindowState> {
    let window = CheckInWindow::new(window_start, window_end)?;
    Ok(window.state_at(now))
}

impl CheckInWindow {
    pub fn state_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WindowState {
        // Wall-clock arithmetic: a DST shift inside the remaining span is not compensated.
        let local = now.naive_local();
        let today = local.date();
        let time = local.time();

        if self.contains(time) {
            WindowState {
                is_open: true,
                time_remaining: today.and_time(self.end()) - local,
            }
        } else if time >= self.end() {
            WindowState {
                is_open: false,
                time_remaining: today.and_time(self.start()) + Duration::days(1) - local,
            }
        } else {
            WindowState {
                is_open: false,
                time_remaining: today.and_time(self.start()) - local,
            }
        }
    }
}
