use chrono::{DateTime, Utc};

use super::feed_model::{FeedEntry, FeedQuery};
use crate::errors::Result;

/// Trait for feed service operations
pub trait FeedServiceTrait: Send + Sync {
    /// Ranked feed as seen by `viewer_id` at `now`.
    fn get_feed(
        &self,
        viewer_id: &str,
        query: &FeedQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedEntry>>;
}
