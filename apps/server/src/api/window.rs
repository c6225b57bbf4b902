use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use goalsync_core::window::CheckInWindow;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowStatus {
    is_open: bool,
    /// Until close when open, until the next opening when closed.
    seconds_remaining: i64,
    window: CheckInWindow,
    timezone: String,
    enforced: bool,
}

async fn get_window(State(state): State<Arc<AppState>>) -> Json<WindowStatus> {
    let settings = &state.settings;
    let now = Utc::now().with_timezone(&settings.timezone);
    let window_state = settings.window.state_at(&now);
    Json(WindowStatus {
        is_open: window_state.is_open,
        seconds_remaining: window_state.seconds_remaining(),
        window: settings.window,
        timezone: settings.timezone.name().to_string(),
        enforced: settings.enforce_window,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/window", get(get_window))
}
