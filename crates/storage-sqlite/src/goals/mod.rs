//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::{GoalDB, GoalStreakChangeset, NewGoalDB};
pub(crate) use repository::find_goal;
pub use repository::GoalRepository;
