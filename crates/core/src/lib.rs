//! GoalSync Core - Domain entities, services, and traits.
//!
//! This crate contains the streak, check-in window and feed integrity logic
//! for GoalSync. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod checkins;
pub mod constants;
pub mod errors;
pub mod events;
pub mod feed;
pub mod friends;
pub mod goals;
pub mod settings;
pub mod streaks;
pub mod utils;
pub mod window;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
