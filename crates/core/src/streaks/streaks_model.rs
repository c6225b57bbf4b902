//! Streak and milestone domain models.

use serde::{Deserialize, Serialize};

/// One entry of the milestone catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub tier: u32,
    pub emoji: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

/// Emitted when a check-in lands exactly on a milestone tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneReached {
    pub tier: u32,
    pub emoji: String,
    pub title: String,
    pub message: String,
}

impl From<&Milestone> for MilestoneReached {
    fn from(milestone: &Milestone) -> Self {
        Self {
            tier: milestone.tier,
            emoji: milestone.emoji.to_string(),
            title: milestone.title.to_string(),
            message: milestone.message.to_string(),
        }
    }
}

/// Outcome of applying one successful check-in to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResult {
    pub previous_streak: u32,
    pub streak: u32,
    /// A missed day discarded a non-zero streak before this check-in.
    pub streak_reset: bool,
    pub milestone: Option<MilestoneReached>,
}

/// Position of a streak between two milestone tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub prev_tier: u32,
    pub next_tier: u32,
    /// 0..=100
    pub percent: u8,
    pub days_to_next: u32,
}
