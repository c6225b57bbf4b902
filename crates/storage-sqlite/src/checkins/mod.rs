//! SQLite storage implementation for check-ins.

mod model;
mod repository;

pub use model::CheckInDB;
pub use repository::CheckInRepository;
