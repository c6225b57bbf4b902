//! SQLite storage implementation for friendships.

mod model;
mod repository;

pub use model::{FriendshipDB, NewFriendshipDB};
pub use repository::FriendshipRepository;
