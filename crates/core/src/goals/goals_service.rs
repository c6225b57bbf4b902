use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use crate::constants::DEFAULT_GOAL_CATEGORY;
use crate::errors::{DatabaseError, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::goals::goals_model::{Goal, GoalProgress, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::settings::CheckInSettings;
use crate::streaks::{is_streak_at_risk, progress_to_next_milestone, reconcile_goal};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    settings: Arc<CheckInSettings>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>, settings: Arc<CheckInSettings>) -> Self {
        GoalService {
            goal_repo,
            settings,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Loads a goal and hides it from anyone but its owner.
    fn owned_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        if goal.user_id != user_id {
            return Err(DatabaseError::NotFound(format!("Goal {} not found", goal_id)).into());
        }
        Ok(goal)
    }

    fn reconcile(&self, goal: &Goal, now: DateTime<Utc>) -> Result<Goal> {
        reconcile_goal(
            goal,
            &now.with_timezone(&self.settings.timezone),
            self.settings.enforced_window(),
        )
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str, now: DateTime<Utc>) -> Result<Vec<Goal>> {
        self.goal_repo
            .load_goals(user_id)?
            .iter()
            .map(|goal| self.reconcile(goal, now))
            .collect()
    }

    fn get_goal(&self, user_id: &str, goal_id: &str, now: DateTime<Utc>) -> Result<Goal> {
        let goal = self.owned_goal(user_id, goal_id)?;
        self.reconcile(&goal, now)
    }

    fn get_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GoalProgress> {
        let goal = self.get_goal(user_id, goal_id, now)?;
        let window = self
            .settings
            .window
            .state_at(&now.with_timezone(&self.settings.timezone));
        // reconcile_goal has already rejected negative streaks
        let milestone = progress_to_next_milestone(goal.current_streak.max(0) as u32);
        let at_risk = is_streak_at_risk(&goal, &window, self.settings.streak_risk_threshold);

        Ok(GoalProgress {
            goal,
            milestone,
            window_open: window.is_open,
            window_seconds_remaining: window.seconds_remaining(),
            at_risk,
        })
    }

    async fn create_goal(&self, mut new_goal: NewGoal) -> Result<Goal> {
        let title = new_goal.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        new_goal.title = title.to_string();

        if new_goal.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }

        new_goal.description = new_goal
            .description
            .map(|description| description.trim().to_string())
            .filter(|description| !description.is_empty());
        new_goal.category = Some(
            new_goal
                .category
                .map(|category| category.trim().to_lowercase())
                .filter(|category| !category.is_empty())
                .unwrap_or_else(|| DEFAULT_GOAL_CATEGORY.to_string()),
        );

        let goal = self.goal_repo.insert_new_goal(new_goal).await?;
        debug!("Created goal {} for user {}", goal.id, goal.user_id);

        self.event_sink.emit(DomainEvent::goals_changed(
            goal.user_id.clone(),
            vec![goal.id.clone()],
        ));
        Ok(goal)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        self.owned_goal(user_id, goal_id)?;
        let deleted = self.goal_repo.delete_goal(goal_id.to_string()).await?;
        debug!("Deleted goal {} for user {}", goal_id, user_id);

        self.event_sink.emit(DomainEvent::goals_changed(
            user_id.to_string(),
            vec![goal_id.to_string()],
        ));
        Ok(deleted)
    }
}
