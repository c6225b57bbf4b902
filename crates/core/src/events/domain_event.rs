//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::friends::FriendshipStatus;
use crate::streaks::MilestoneReached;

/// Something that happened to a goal, a check-in or a friendship.
///
/// The server relays these to SSE subscribers; a `MilestoneReached` is what
/// clients turn into a celebration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A check-in was accepted and the goal's streak updated.
    CheckInRecorded {
        goal_id: String,
        user_id: String,
        check_in_id: String,
        streak: u32,
    },

    /// A check-in landed exactly on a milestone tier.
    MilestoneReached {
        goal_id: String,
        user_id: String,
        milestone: MilestoneReached,
    },

    /// Goals were created or deleted.
    GoalsChanged {
        user_id: String,
        goal_ids: Vec<String>,
    },

    /// A friendship was requested, answered or removed.
    FriendshipChanged {
        friendship_id: String,
        requester_id: String,
        addressee_id: String,
        /// `None` when the friendship was removed.
        status: Option<FriendshipStatus>,
    },
}

impl DomainEvent {
    /// Creates a CheckInRecorded event.
    pub fn check_in_recorded(
        goal_id: String,
        user_id: String,
        check_in_id: String,
        streak: u32,
    ) -> Self {
        Self::CheckInRecorded {
            goal_id,
            user_id,
            check_in_id,
            streak,
        }
    }

    /// Creates a MilestoneReached event.
    pub fn milestone_reached(goal_id: String, user_id: String, milestone: MilestoneReached) -> Self {
        Self::MilestoneReached {
            goal_id,
            user_id,
            milestone,
        }
    }

    /// Creates a GoalsChanged event.
    pub fn goals_changed(user_id: String, goal_ids: Vec<String>) -> Self {
        Self::GoalsChanged { user_id, goal_ids }
    }

    /// Creates a FriendshipChanged event.
    pub fn friendship_changed(
        friendship_id: String,
        requester_id: String,
        addressee_id: String,
        status: Option<FriendshipStatus>,
    ) -> Self {
        Self::FriendshipChanged {
            friendship_id,
            requester_id,
            addressee_id,
            status,
        }
    }

    /// The user whose own data the event is about.
    pub fn user_id(&self) -> &str {
        match self {
            Self::CheckInRecorded { user_id, .. }
            | Self::MilestoneReached { user_id, .. }
            | Self::GoalsChanged { user_id, .. } => user_id,
            Self::FriendshipChanged { addressee_id, .. } => addressee_id,
        }
    }
}
