use std::sync::Arc;

use crate::{api::shared::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use goalsync_core::friends::{Friend, Friendship};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FriendRequestBody {
    target_user_id: String,
}

async fn get_friends(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Vec<Friend>>> {
    Ok(Json(state.friend_service.get_friends(&user_id)?))
}

async fn get_pending_requests(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Vec<Friend>>> {
    Ok(Json(state.friend_service.get_pending_requests(&user_id)?))
}

async fn send_request(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(body): Json<FriendRequestBody>,
) -> ApiResult<(StatusCode, Json<Friendship>)> {
    let friendship = state
        .friend_service
        .send_request(&user_id, &body.target_user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(friendship)))
}

async fn accept_request(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Friendship>> {
    Ok(Json(
        state.friend_service.accept_request(&user_id, &id).await?,
    ))
}

async fn reject_request(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Friendship>> {
    Ok(Json(
        state.friend_service.reject_request(&user_id, &id).await?,
    ))
}

async fn remove_friend(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<StatusCode> {
    state.friend_service.remove_friend(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/friends", get(get_friends))
        .route("/friends/requests", get(get_pending_requests))
        .route("/friends/request", post(send_request))
        .route("/friends/{id}/accept", post(accept_request))
        .route("/friends/{id}/reject", post(reject_request))
        .route("/friends/{id}", delete(remove_friend))
}
