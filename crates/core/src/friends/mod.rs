//! Friends module - friendships that scope the social feed.

mod friends_model;
mod friends_service;
mod friends_traits;


pub use friends_model::{Friend, Friendship, FriendshipStatus, NewFriendship};
pub use friends_service::FriendService;
pub use friends_traits::{
    FriendRequestCheck, FriendServiceTrait, FriendshipRepositoryTrait, FriendshipTransition,
};
