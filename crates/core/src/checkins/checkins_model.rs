//! Check-in domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goals::Goal;
use crate::streaks::CheckInResult;

/// One accepted daily check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    /// Opaque reference to the uploaded photo.
    pub photo_reference: Option<String>,
    pub caption: Option<String>,
    pub streak_at_check_in: i32,
    pub verification_message: Option<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Verdict of the external photo verifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoVerification {
    pub verified: bool,
    pub message: Option<String>,
}

/// Input model for submitting a check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckIn {
    pub goal_id: String,
    #[serde(default)]
    pub user_id: String,
    pub photo_reference: Option<String>,
    pub caption: Option<String>,
    /// Absent when the caller has already gated the photo.
    pub verification: Option<PhotoVerification>,
}

/// Everything a successful check-in produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub goal: Goal,
    pub check_in: CheckIn,
    pub result: CheckInResult,
}
