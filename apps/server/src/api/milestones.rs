use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::Query, routing::get, Json, Router};
use goalsync_core::streaks::{milestones, progress_to_next_milestone, Milestone, MilestoneProgress};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestonesQuery {
    current_streak: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MilestonesResponse {
    milestones: &'static [Milestone],
    progress: Option<MilestoneProgress>,
}

/// The milestone catalogue, plus progress when `currentStreak` is given.
async fn get_milestones(Query(query): Query<MilestonesQuery>) -> Json<MilestonesResponse> {
    Json(MilestonesResponse {
        milestones: milestones(),
        progress: query.current_streak.map(progress_to_next_milestone),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/milestones", get(get_milestones))
}
