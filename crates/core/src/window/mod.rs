//! Check-in window module - when check-ins are accepted during the day.

mod window_calculator;
mod window_model;

pub use window_calculator::compute_window_state;
pub use window_model::{CheckInWindow, WindowState};
