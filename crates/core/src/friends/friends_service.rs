use async_trait::async_trait;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use super::friends_model::{Friend, Friendship, FriendshipStatus, NewFriendship};
use super::friends_traits::{
    FriendRequestCheck, FriendServiceTrait, FriendshipRepositoryTrait, FriendshipTransition,
};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};

pub struct FriendService {
    repository: Arc<dyn FriendshipRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl FriendService {
    pub fn new(repository: Arc<dyn FriendshipRepositoryTrait>) -> Self {
        Self {
            repository,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Loads a friendship `user_id` is part of; anyone else gets NotFound.
    fn visible_friendship(&self, user_id: &str, friendship_id: &str) -> Result<Friendship> {
        let friendship = self.repository.get_friendship(friendship_id)?;
        ensure_visible(&friendship, user_id)?;
        Ok(friendship)
    }

    async fn answer_request(
        &self,
        user_id: &str,
        friendship_id: &str,
        status: FriendshipStatus,
    ) -> Result<Friendship> {
        let updated = self
            .repository
            .update_status(friendship_id.to_string(), answer(user_id.to_string(), status))
            .await?;
        debug!("Friendship {} is now {}", updated.id, status.as_str());
        self.emit_changed(&updated, Some(status));
        Ok(updated)
    }

    fn emit_changed(&self, friendship: &Friendship, status: Option<FriendshipStatus>) {
        self.event_sink.emit(DomainEvent::friendship_changed(
            friendship.id.clone(),
            friendship.requester_id.clone(),
            friendship.addressee_id.clone(),
            status,
        ));
    }
}

fn ensure_visible(friendship: &Friendship, user_id: &str) -> Result<()> {
    if !friendship.involves(user_id) {
        return Err(
            DatabaseError::NotFound(format!("Friendship {} not found", friendship.id)).into(),
        );
    }
    Ok(())
}

/// A pair may only start over once every earlier request was rejected.
fn no_open_friendship() -> FriendRequestCheck {
    Box::new(|between_pair: &[Friendship]| {
        let open = between_pair
            .iter()
            .find(|f| f.status != FriendshipStatus::Rejected);
        match open.map(|f| f.status) {
            None => Ok(()),
            Some(FriendshipStatus::Accepted) => {
                Err(Error::ConstraintViolation("Already friends".to_string()))
            }
            Some(_) => Err(Error::ConstraintViolation(
                "Friend request already pending".to_string(),
            )),
        }
    })
}

/// Lets only the addressee move a pending request to `status`.
fn answer(user_id: String, status: FriendshipStatus) -> FriendshipTransition {
    Box::new(move |friendship: &Friendship| {
        ensure_visible(friendship, &user_id)?;
        if friendship.addressee_id != user_id {
            return Err(Error::PermissionDenied(
                "Only the recipient can answer a friend request".to_string(),
            ));
        }
        if friendship.status != FriendshipStatus::Pending {
            return Err(Error::ConstraintViolation(format!(
                "Friend request is already {}",
                friendship.status.as_str()
            )));
        }
        Ok(status)
    })
}

#[async_trait]
impl FriendServiceTrait for FriendService {
    async fn send_request(&self, user_id: &str, target_user_id: &str) -> Result<Friendship> {
        let target_user_id = target_user_id.trim();
        if target_user_id.is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if target_user_id == user_id {
            return Err(ValidationError::InvalidInput(
                "Cannot send a friend request to yourself".to_string(),
            )
            .into());
        }

        let friendship = self
            .repository
            .insert_friendship(
                NewFriendship {
                    requester_id: user_id.to_string(),
                    addressee_id: target_user_id.to_string(),
                },
                no_open_friendship(),
            )
            .await?;
        debug!(
            "Friend request {} from {} to {}",
            friendship.id, user_id, target_user_id
        );
        self.emit_changed(&friendship, Some(FriendshipStatus::Pending));
        Ok(friendship)
    }

    async fn accept_request(&self, user_id: &str, friendship_id: &str) -> Result<Friendship> {
        self.answer_request(user_id, friendship_id, FriendshipStatus::Accepted)
            .await
    }

    async fn reject_request(&self, user_id: &str, friendship_id: &str) -> Result<Friendship> {
        self.answer_request(user_id, friendship_id, FriendshipStatus::Rejected)
            .await
    }

    async fn remove_friend(&self, user_id: &str, friendship_id: &str) -> Result<()> {
        let friendship = self.visible_friendship(user_id, friendship_id)?;
        self.repository
            .delete_friendship(friendship_id.to_string())
            .await?;
        debug!("Removed friendship {}", friendship_id);
        self.emit_changed(&friendship, None);
        Ok(())
    }

    fn get_friends(&self, user_id: &str) -> Result<Vec<Friend>> {
        Ok(self
            .repository
            .list_friendships(user_id)?
            .iter()
            .filter(|f| f.status == FriendshipStatus::Accepted)
            .filter_map(|f| Friend::from_friendship(f, user_id))
            .collect())
    }

    fn get_pending_requests(&self, user_id: &str) -> Result<Vec<Friend>> {
        Ok(self
            .repository
            .list_friendships(user_id)?
            .iter()
            .filter(|f| f.status == FriendshipStatus::Pending && f.addressee_id == user_id)
            .filter_map(|f| Friend::from_friendship(f, user_id))
            .collect())
    }

    fn friend_ids(&self, user_id: &str) -> Result<HashSet<String>> {
        Ok(self
            .get_friends(user_id)?
            .into_iter()
            .map(|friend| friend.user_id)
            .filter(|id| id != user_id)
            .collect())
    }
}
