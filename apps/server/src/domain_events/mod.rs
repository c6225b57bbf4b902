//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via DomainEventSink and hands them to a queue
//! worker that logs them and publishes them on the `EventBus`, where SSE
//! subscribers pick them up.

mod planner;
mod queue_worker;
mod sink;

pub use sink::WebDomainEventSink;
