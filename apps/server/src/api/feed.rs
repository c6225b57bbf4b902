use std::sync::Arc;

use crate::{api::shared::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use goalsync_core::feed::{FeedEntry, FeedQuery};

async fn get_feed(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer_id): CurrentUser,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<FeedEntry>>> {
    let feed = state.feed_service.get_feed(&viewer_id, &query, Utc::now())?;
    Ok(Json(feed))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/feed", get(get_feed))
}
