//! Friendship domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Rejected => "rejected",
        }
    }

    /// Parses the stored representation; unknown values read as pending.
    pub fn from_db(value: &str) -> Self {
        match value {
            "accepted" => FriendshipStatus::Accepted,
            "rejected" => FriendshipStatus::Rejected,
            _ => FriendshipStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn involves(&self, user_id: &str) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    /// The party that is not `user_id`, if `user_id` is part of this friendship.
    pub fn other_party(&self, user_id: &str) -> Option<&str> {
        if self.requester_id == user_id {
            Some(self.addressee_id.as_str())
        } else if self.addressee_id == user_id {
            Some(self.requester_id.as_str())
        } else {
            None
        }
    }
}

/// Input model for a friend request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFriendship {
    pub requester_id: String,
    pub addressee_id: String,
}

/// A friendship as seen from one of its two users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub friendship_id: String,
    pub user_id: String,
    pub status: FriendshipStatus,
    /// True when the viewer sent the request.
    pub requested_by_me: bool,
    pub created_at: DateTime<Utc>,
}

impl Friend {
    pub fn from_friendship(friendship: &Friendship, viewer_id: &str) -> Option<Self> {
        friendship.other_party(viewer_id).map(|other| Friend {
            friendship_id: friendship.id.clone(),
            user_id: other.to_string(),
            status: friendship.status,
            requested_by_me: friendship.requester_id == viewer_id,
            created_at: friendship.created_at,
        })
    }
}
