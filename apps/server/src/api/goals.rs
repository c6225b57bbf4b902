use std::sync::Arc;

use crate::{api::shared::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use goalsync_core::goals::{Goal, GoalProgress, NewGoal};

async fn get_goals(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&user_id, Utc::now())?;
    Ok(Json(goals))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(&user_id, &id, Utc::now())?;
    Ok(Json(goal))
}

async fn get_goal_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<GoalProgress>> {
    let progress = state
        .goal_service
        .get_goal_progress(&user_id, &id, Utc::now())?;
    Ok(Json(progress))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(mut goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    goal.user_id = user_id;
    let g = state.goal_service.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_goal(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", get(get_goal).delete(delete_goal))
        .route("/goals/{id}/progress", get(get_goal_progress))
}
