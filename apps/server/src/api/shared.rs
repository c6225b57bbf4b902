use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, main_lib::AppState};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity, taken from the `x-user-id` header set by the
/// authenticating proxy. Falls back to the configured default user.
pub struct CurrentUser(pub String);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentUser(state.default_user.clone()));
        };
        let user_id = value
            .to_str()
            .map_err(|_| ApiError::BadRequest(format!("{} is not valid text", USER_ID_HEADER)))?
            .trim();
        if user_id.is_empty() {
            return Err(ApiError::BadRequest(format!("{} is empty", USER_ID_HEADER)));
        }
        Ok(CurrentUser(user_id.to_string()))
    }
}
