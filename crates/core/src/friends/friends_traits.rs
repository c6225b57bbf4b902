use async_trait::async_trait;
use std::collections::HashSet;

use super::friends_model::{Friend, Friendship, FriendshipStatus, NewFriendship};
use crate::errors::Result;

/// Vets a new request against the friendships already stored between the
/// same two users, in either direction. Runs inside the write transaction.
pub type FriendRequestCheck = Box<dyn FnOnce(&[Friendship]) -> Result<()> + Send + 'static>;

/// Decides the next status of a stored friendship. Runs inside the write
/// transaction.
pub type FriendshipTransition =
    Box<dyn FnOnce(&Friendship) -> Result<FriendshipStatus> + Send + 'static>;

/// Trait for friendship repository operations
#[async_trait]
pub trait FriendshipRepositoryTrait: Send + Sync {
    fn get_friendship(&self, friendship_id: &str) -> Result<Friendship>;
    /// Every friendship `user_id` is part of, in either direction.
    fn list_friendships(&self, user_id: &str) -> Result<Vec<Friendship>>;
    /// Inserts the request if `check` passes. Calls are serialized, so two
    /// requests between the same pair cannot both pass.
    async fn insert_friendship(
        &self,
        new_friendship: NewFriendship,
        check: FriendRequestCheck,
    ) -> Result<Friendship>;
    /// Reads the friendship, applies `transition` and stores the new status
    /// atomically. If `transition` fails nothing is written.
    async fn update_status(
        &self,
        friendship_id: String,
        transition: FriendshipTransition,
    ) -> Result<Friendship>;
    async fn delete_friendship(&self, friendship_id: String) -> Result<usize>;
}

/// Trait for friend service operations
#[async_trait]
pub trait FriendServiceTrait: Send + Sync {
    async fn send_request(&self, user_id: &str, target_user_id: &str) -> Result<Friendship>;
    /// Only the addressee of a pending request may answer it.
    async fn accept_request(&self, user_id: &str, friendship_id: &str) -> Result<Friendship>;
    async fn reject_request(&self, user_id: &str, friendship_id: &str) -> Result<Friendship>;
    async fn remove_friend(&self, user_id: &str, friendship_id: &str) -> Result<()>;
    fn get_friends(&self, user_id: &str) -> Result<Vec<Friend>>;
    /// Pending requests addressed to `user_id`.
    fn get_pending_requests(&self, user_id: &str) -> Result<Vec<Friend>>;
    /// Ids of users with an accepted friendship with `user_id`.
    fn friend_ids(&self, user_id: &str) -> Result<HashSet<String>>;
}
