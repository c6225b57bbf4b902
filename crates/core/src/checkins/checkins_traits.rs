use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::checkins_model::{CheckIn, CheckInOutcome, NewCheckIn};
use crate::errors::Result;
use crate::goals::Goal;

/// Turns the goal as currently stored into the goal to store plus the
/// check-in to insert. Runs inside the repository's write transaction.
pub type CheckInMutation = Box<dyn FnOnce(Goal) -> Result<CheckInOutcome> + Send + 'static>;

/// Trait for check-in repository operations
#[async_trait]
pub trait CheckInRepositoryTrait: Send + Sync {
    /// Reads the goal, applies `mutation` and persists the updated goal and
    /// the new check-in atomically.
    ///
    /// Calls for the same goal are serialized: the second one observes the
    /// first one's result. If `mutation` fails nothing is written.
    async fn commit_check_in(
        &self,
        goal_id: String,
        mutation: CheckInMutation,
    ) -> Result<CheckInOutcome>;

    fn get_check_in(&self, check_in_id: &str) -> Result<CheckIn>;

    /// Newest first, optionally narrowed to one goal and/or one user.
    fn list_check_ins(&self, goal_id: Option<&str>, user_id: Option<&str>)
        -> Result<Vec<CheckIn>>;

    /// Check-ins created at or after `since`, newest first.
    fn list_check_ins_since(&self, since: DateTime<Utc>) -> Result<Vec<CheckIn>>;

    async fn increment_like_count(&self, check_in_id: String) -> Result<CheckIn>;
}

/// Trait for check-in service operations
#[async_trait]
pub trait CheckInServiceTrait: Send + Sync {
    async fn submit_check_in(
        &self,
        new_check_in: NewCheckIn,
        now: DateTime<Utc>,
    ) -> Result<CheckInOutcome>;

    /// The user's check-ins, newest first, optionally for one goal.
    fn get_check_ins(&self, user_id: &str, goal_id: Option<&str>) -> Result<Vec<CheckIn>>;

    async fn like_check_in(&self, check_in_id: &str) -> Result<CheckIn>;
}
