//! Sink that hands core domain events to the SSE queue worker.

use std::sync::Mutex;

use goalsync_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::mpsc;

use super::queue_worker::event_queue_worker;
use crate::events::EventBus;

/// Services are built with the sink before the event bus exists, so the
/// worker is started in a second step with `start_worker()`. Events emitted
/// in between are buffered in the channel.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Spawns the worker that publishes events on `event_bus`.
    ///
    /// Only the first call starts a worker; later calls are logged and ignored.
    pub fn start_worker(&self, event_bus: EventBus) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match rx {
            Some(rx) => {
                tokio::spawn(event_queue_worker(rx, event_bus));
            }
            None => tracing::warn!("Domain event worker already started"),
        }
    }

    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        Self {
            tx,
            rx: Mutex::new(None),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Best-effort: a closed channel drops the event.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to emit domain event: {}", e);
        }
    }
}
