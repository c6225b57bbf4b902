//! Feed module - integrity scoring and ranking of the social check-in feed.

mod feed_model;
mod feed_service;
mod feed_traits;
mod integrity_scorer;


pub use feed_model::{BadgeThresholds, FeedEntry, FeedQuery, IntegrityBadge, IntegrityScore};
pub use feed_service::FeedService;
pub use feed_traits::FeedServiceTrait;
pub use integrity_scorer::{consistency_rate, rank_feed, score, IntegrityScorer};
