//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::streaks::MilestoneProgress;

/// Check-in cadence chosen for a goal.
///
/// Informational only: streak arithmetic always counts daily check-ins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "3x-week")]
    ThreeTimesWeek,
    #[serde(rename = "weekdays")]
    Weekdays,
    #[serde(rename = "weekly")]
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::ThreeTimesWeek => "3x-week",
            Frequency::Weekdays => "weekdays",
            Frequency::Weekly => "weekly",
        }
    }

    /// Parses the stored representation; unknown values fall back to daily.
    pub fn from_db(value: &str) -> Self {
        match value {
            "3x-week" => Frequency::ThreeTimesWeek,
            "weekdays" => Frequency::Weekdays,
            "weekly" => Frequency::Weekly,
            _ => Frequency::Daily,
        }
    }
}

/// Domain model representing a tracked habit or commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub frequency: Frequency,
    /// Consecutive daily check-ins. Stored signed so corrupt rows are detectable.
    pub current_streak: i32,
    pub longest_streak: i32,
    pub checked_today: bool,
    pub last_check_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Usually filled by the external classifier; defaults to "general".
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
}

/// A goal as seen right now: its streak, the way to the next milestone and
/// whether the day's window is about to close on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal: Goal,
    pub milestone: MilestoneProgress,
    pub window_open: bool,
    pub window_seconds_remaining: i64,
    pub at_risk: bool,
}
