//! SQLite storage implementation for GoalSync.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `goalsync-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, check-ins and friendships
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Every write goes through the single writer actor (`db::write_actor`), so
//! check-ins for the same goal are applied one after another.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod checkins;
pub mod friends;
pub mod goals;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from goalsync-core for convenience
pub use goalsync_core::errors::{DatabaseError, Error, Result};
