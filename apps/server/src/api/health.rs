use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    db_path: String,
}

async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_path: state.db_path.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
