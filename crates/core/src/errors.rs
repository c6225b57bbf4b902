//! Core error types for GoalSync.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::{DateTime, NaiveDate, NaiveTime, ParseError as ChronoParseError, Utc};
use std::num::ParseIntError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the GoalSync core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Check-in rejected: {0}")]
    CheckIn(#[from] CheckInError),

    #[error("Check-in window misconfigured: {0}")]
    Window(#[from] WindowError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Reasons a check-in is refused. None of these mutate the goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckInError {
    #[error("Goal {goal_id} was already checked in on {date}")]
    AlreadyCheckedInToday { goal_id: String, date: NaiveDate },

    #[error("Check-in window is closed; it opens in {opens_in_seconds} seconds")]
    WindowClosed { opens_in_seconds: i64 },

    /// Stored streak is negative. This is a data-integrity fault and is never clamped.
    #[error("Goal {goal_id} has a corrupt streak value {value}")]
    CorruptStreak { goal_id: String, value: i32 },

    #[error("Photo verification rejected the check-in: {0}")]
    VerificationRejected(String),

    #[error("Goal {goal_id} was last checked in at {last_check_in_at}, after {attempted_at}")]
    OutOfOrder {
        goal_id: String,
        last_check_in_at: DateTime<Utc>,
        attempted_at: DateTime<Utc>,
    },
}

/// Check-in window configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window start {start} must be before window end {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseIntError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Validation(ValidationError::NumberParse(err))
    }
}

impl Error {
    /// True when the error means the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}
