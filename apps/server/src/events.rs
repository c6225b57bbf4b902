use serde_json::Value;
use tokio::sync::broadcast;

/// SSE event names on `/api/v1/events/stream`.
pub const CHECKIN_RECORDED: &str = "checkin:recorded";
pub const MILESTONE_REACHED: &str = "milestone:reached";
pub const GOALS_CHANGED: &str = "goals:changed";
pub const FRIENDSHIP_CHANGED: &str = "friendship:changed";

/// One SSE message: the event name and its JSON data, if any.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    /// An event with no data, sent as `null`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

/// Fans events out to every open SSE connection. Subscribers that fall more
/// than `capacity` events behind skip the oldest ones.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Sends to whoever is connected right now; events published while
    /// nobody listens are gone.
    pub fn publish(&self, event: ServerEvent) {
        let name = event.name;
        if self.sender.send(event).is_err() {
            tracing::trace!("No SSE subscribers for {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn only_connected_subscribers_receive_events() {
        let bus = EventBus::new(4);
        bus.publish(ServerEvent::new(GOALS_CHANGED));

        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        bus.publish(ServerEvent::with_payload(
            CHECKIN_RECORDED,
            json!({ "streak": 3 }),
        ));

        for subscriber in [&mut first, &mut second] {
            let event = subscriber.recv().await.unwrap();
            assert_eq!(event.name, CHECKIN_RECORDED);
            assert_eq!(event.payload.unwrap()["streak"], 3);
            assert!(subscriber.try_recv().is_err());
        }
    }
}
