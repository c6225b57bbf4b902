/// Default opening time of the daily check-in window (hours, minutes).
pub const DEFAULT_WINDOW_START: (u32, u32) = (8, 0);

/// Default closing time of the daily check-in window (hours, minutes). Exclusive.
pub const DEFAULT_WINDOW_END: (u32, u32) = (22, 0);

/// Trailing number of calendar days used to compute a consistency rate.
pub const DEFAULT_CONSISTENCY_WINDOW_DAYS: u32 = 30;

/// Consistency rate (percent) required for each integrity badge.
pub const GOLD_BADGE_MIN_RATE: u8 = 90;
pub const SILVER_BADGE_MIN_RATE: u8 = 70;
pub const BRONZE_BADGE_MIN_RATE: u8 = 50;

/// Default number of entries returned by the feed.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// A streak is at risk when less than this many minutes of the window remain.
pub const DEFAULT_STREAK_RISK_MINUTES: i64 = 120;

/// Category assigned to goals created without one.
pub const DEFAULT_GOAL_CATEGORY: &str = "general";
