//! Feed domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{BRONZE_BADGE_MIN_RATE, GOLD_BADGE_MIN_RATE, SILVER_BADGE_MIN_RATE};
use crate::errors::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityBadge {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
}

/// Minimum consistency rate for each badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeThresholds {
    pub gold: u8,
    pub silver: u8,
    pub bronze: u8,
}

impl Default for BadgeThresholds {
    fn default() -> Self {
        Self {
            gold: GOLD_BADGE_MIN_RATE,
            silver: SILVER_BADGE_MIN_RATE,
            bronze: BRONZE_BADGE_MIN_RATE,
        }
    }
}

impl BadgeThresholds {
    /// Thresholds must be at most 100 and non-increasing from gold to bronze.
    pub fn validate(&self) -> Result<()> {
        if self.gold > 100 || self.gold < self.silver || self.silver < self.bronze {
            return Err(ValidationError::InvalidInput(format!(
                "Badge thresholds must satisfy 100 >= gold >= silver >= bronze, got {}/{}/{}",
                self.gold, self.silver, self.bronze
            ))
            .into());
        }
        Ok(())
    }

    pub fn badge_for(&self, rate: u8) -> IntegrityBadge {
        if rate >= self.gold {
            IntegrityBadge::Gold
        } else if rate >= self.silver {
            IntegrityBadge::Silver
        } else if rate >= self.bronze {
            IntegrityBadge::Bronze
        } else {
            IntegrityBadge::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityScore {
    /// 0..=100
    pub consistency_rate: u8,
    pub active_days: u32,
    pub badge: IntegrityBadge,
}

/// One goal's latest check-in as shown in the social feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub check_in_id: String,
    pub user_id: String,
    pub goal_id: String,
    pub goal_title: String,
    pub caption: Option<String>,
    pub photo_reference: Option<String>,
    pub current_streak: u32,
    pub consistency_rate: u8,
    pub integrity_badge: IntegrityBadge,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    #[serde(default)]
    pub friends_only: bool,
    pub limit: Option<usize>,
}
