use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::checkins_model::{CheckIn, CheckInOutcome, NewCheckIn};
use super::checkins_traits::{CheckInMutation, CheckInRepositoryTrait, CheckInServiceTrait};
use crate::errors::{CheckInError, DatabaseError, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::goals::Goal;
use crate::settings::CheckInSettings;
use crate::streaks::apply_check_in;

const UNVERIFIED_PHOTO_MESSAGE: &str = "Photo could not be verified";

/// Service for recording check-ins.
///
/// Validation that does not depend on stored state (verification verdict,
/// window) happens up front. The streak update itself runs inside the
/// repository's write transaction so concurrent submissions for one goal see
/// each other.
pub struct CheckInService {
    repository: Arc<dyn CheckInRepositoryTrait>,
    settings: Arc<CheckInSettings>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CheckInService {
    pub fn new(
        repository: Arc<dyn CheckInRepositoryTrait>,
        settings: Arc<CheckInSettings>,
    ) -> Self {
        Self {
            repository,
            settings,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn emit_outcome(&self, outcome: &CheckInOutcome) {
        let mut events = vec![DomainEvent::check_in_recorded(
            outcome.goal.id.clone(),
            outcome.goal.user_id.clone(),
            outcome.check_in.id.clone(),
            outcome.result.streak,
        )];
        if let Some(milestone) = &outcome.result.milestone {
            events.push(DomainEvent::milestone_reached(
                outcome.goal.id.clone(),
                outcome.goal.user_id.clone(),
                milestone.clone(),
            ));
        }
        self.event_sink.emit_batch(events);
    }
}

#[async_trait]
impl CheckInServiceTrait for CheckInService {
    async fn submit_check_in(
        &self,
        new_check_in: NewCheckIn,
        now: DateTime<Utc>,
    ) -> Result<CheckInOutcome> {
        let goal_id = new_check_in.goal_id.trim().to_string();
        if goal_id.is_empty() {
            return Err(ValidationError::MissingField("goalId".to_string()).into());
        }
        if new_check_in.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }

        if let Some(verification) = &new_check_in.verification {
            if !verification.verified {
                let message = verification
                    .message
                    .clone()
                    .unwrap_or_else(|| UNVERIFIED_PHOTO_MESSAGE.to_string());
                warn!("Rejected check-in for goal {}: {}", goal_id, message);
                return Err(CheckInError::VerificationRejected(message).into());
            }
        }

        let local_now = now.with_timezone(&self.settings.timezone);
        if self.settings.enforce_window {
            let window = self.settings.window.state_at(&local_now);
            if !window.is_open {
                warn!(
                    "Rejected check-in for goal {}: window closed, opens in {}s",
                    goal_id,
                    window.seconds_remaining()
                );
                return Err(CheckInError::WindowClosed {
                    opens_in_seconds: window.seconds_remaining(),
                }
                .into());
            }
        }

        let mutation: CheckInMutation = Box::new(move |goal: Goal| {
            if goal.user_id != new_check_in.user_id {
                return Err(DatabaseError::NotFound(format!("Goal {} not found", goal.id)).into());
            }

            let (updated, result) = apply_check_in(&goal, &local_now)?;
            let check_in = CheckIn {
                id: Uuid::new_v4().to_string(),
                goal_id: updated.id.clone(),
                user_id: new_check_in.user_id,
                photo_reference: new_check_in.photo_reference,
                caption: new_check_in
                    .caption
                    .map(|caption| caption.trim().to_string())
                    .filter(|caption| !caption.is_empty()),
                streak_at_check_in: updated.current_streak,
                verification_message: new_check_in.verification.and_then(|v| v.message),
                like_count: 0,
                created_at: now,
            };
            Ok(CheckInOutcome {
                goal: updated,
                check_in,
                result,
            })
        });

        let outcome = match self.repository.commit_check_in(goal_id.clone(), mutation).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Check-in for goal {} not recorded: {}", goal_id, err);
                return Err(err);
            }
        };
        debug!(
            "Recorded check-in {} for goal {} (streak {})",
            outcome.check_in.id, outcome.goal.id, outcome.result.streak
        );

        self.emit_outcome(&outcome);
        Ok(outcome)
    }

    fn get_check_ins(&self, user_id: &str, goal_id: Option<&str>) -> Result<Vec<CheckIn>> {
        self.repository.list_check_ins(goal_id, Some(user_id))
    }

    async fn like_check_in(&self, check_in_id: &str) -> Result<CheckIn> {
        self.repository
            .increment_like_count(check_in_id.to_string())
            .await
    }
}
