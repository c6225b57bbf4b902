//! Domain events module.
//!
//! Domain event types and the sink trait services emit through after
//! successful mutations. The server implements the sink to fan events out
//! to connected clients.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
