//! Where core services send their domain events.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receives events for mutations that have already been committed, so a
/// rejected check-in never reaches a sink.
///
/// `emit` is called on the request path and must return immediately. A sink
/// that cannot deliver drops the event; the mutation stands either way.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    /// Emits `events` in order. A check-in that reaches a milestone sends
    /// the recorded event first.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        events.into_iter().for_each(|event| self.emit(event));
    }
}

/// Discards everything. Services start with this until a sink is attached.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Records emitted events so service tests can assert on them.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    recorded: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.lock().unwrap().is_empty()
    }

    /// Tiers of every `MilestoneReached` recorded so far.
    pub fn milestone_tiers(&self) -> Vec<u32> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                DomainEvent::MilestoneReached { milestone, .. } => Some(milestone.tier),
                _ => None,
            })
            .collect()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaks::milestone_for_streak;

    fn recorded(streak: u32) -> DomainEvent {
        DomainEvent::check_in_recorded(
            "g1".to_string(),
            "demo-user".to_string(),
            format!("c{}", streak),
            streak,
        )
    }

    #[test]
    fn noop_sink_accepts_events() {
        let sink = NoOpDomainEventSink;
        sink.emit(recorded(1));
        sink.emit_batch(vec![recorded(2), recorded(3)]);
    }

    #[test]
    fn mock_sink_keeps_batch_order_and_tracks_milestones() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        let week = milestone_for_streak(7).unwrap();
        sink.emit_batch(vec![
            recorded(7),
            DomainEvent::milestone_reached("g1".to_string(), "demo-user".to_string(), week),
        ]);
        sink.emit(recorded(8));

        assert_eq!(sink.len(), 3);
        assert!(matches!(
            sink.events()[0],
            DomainEvent::CheckInRecorded { streak: 7, .. }
        ));
        assert_eq!(sink.milestone_tiers(), vec![7]);
    }
}
