//! Event queue worker for processing domain events.
//!
//! Receives events from an mpsc channel in emission order, logs them and
//! publishes each one on the event bus.

use goalsync_core::events::DomainEvent;
use tokio::sync::mpsc;

use super::planner::plan_server_event;
use crate::events::EventBus;

/// Runs until every sender is dropped.
pub async fn event_queue_worker(mut rx: mpsc::UnboundedReceiver<DomainEvent>, event_bus: EventBus) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        match &event {
            DomainEvent::MilestoneReached {
                goal_id,
                user_id,
                milestone,
            } => {
                tracing::info!(
                    "User {} reached the {}-day milestone on goal {}",
                    user_id,
                    milestone.tier,
                    goal_id
                );
            }
            other => tracing::debug!("Domain event for user {}: {:?}", other.user_id(), other),
        }
        event_bus.publish(plan_server_event(&event));
    }

    tracing::info!("Domain event queue worker shutting down");
}
