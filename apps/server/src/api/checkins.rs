use std::sync::Arc;

use crate::{api::shared::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use goalsync_core::checkins::{CheckIn, CheckInOutcome, NewCheckIn};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckInsQuery {
    goal_id: Option<String>,
}

async fn get_check_ins(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<CheckInsQuery>,
) -> ApiResult<Json<Vec<CheckIn>>> {
    let check_ins = state
        .check_in_service
        .get_check_ins(&user_id, query.goal_id.as_deref())?;
    Ok(Json(check_ins))
}

/// Records a check-in. The streak, milestone and window checks all happen
/// in core; any rejection leaves the goal untouched.
async fn submit_check_in(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(mut payload): Json<NewCheckIn>,
) -> ApiResult<(StatusCode, Json<CheckInOutcome>)> {
    payload.user_id = user_id;
    let outcome = state
        .check_in_service
        .submit_check_in(payload, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn like_check_in(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CheckIn>> {
    let check_in = state.check_in_service.like_check_in(&id).await?;
    Ok(Json(check_in))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/checkins", get(get_check_ins).post(submit_check_in))
        .route("/checkins/{id}/like", post(like_check_in))
}
