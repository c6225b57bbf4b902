use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgress, NewGoal};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Goals owned by `user_id`, oldest first.
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn load_goals_by_ids(&self, goal_ids: &[String]) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    /// Deletes the goal and its check-ins.
    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize>;
}

/// Trait for goal service operations
///
/// Reads take the current instant so day-dependent fields (`checked_today`,
/// lapsed streaks) are derived for the moment of the request.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str, now: DateTime<Utc>) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str, now: DateTime<Utc>) -> Result<Goal>;
    fn get_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GoalProgress>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}
