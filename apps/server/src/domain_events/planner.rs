//! Maps domain events to the server events clients subscribe to.

use goalsync_core::events::DomainEvent;

use crate::events::{
    ServerEvent, CHECKIN_RECORDED, FRIENDSHIP_CHANGED, GOALS_CHANGED, MILESTONE_REACHED,
};

/// Builds the SSE envelope for a domain event. The payload is the event
/// itself, tagged with its `type`.
pub fn plan_server_event(event: &DomainEvent) -> ServerEvent {
    let name = match event {
        DomainEvent::CheckInRecorded { .. } => CHECKIN_RECORDED,
        DomainEvent::MilestoneReached { .. } => MILESTONE_REACHED,
        DomainEvent::GoalsChanged { .. } => GOALS_CHANGED,
        DomainEvent::FriendshipChanged { .. } => FRIENDSHIP_CHANGED,
    };
    match serde_json::to_value(event) {
        Ok(payload) => ServerEvent::with_payload(name, payload),
        Err(err) => {
            tracing::warn!("Dropping payload of {} event: {}", name, err);
            ServerEvent::new(name)
        }
    }
}
