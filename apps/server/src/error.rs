use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use goalsync_core::errors::{CheckInError, DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
        CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CoreError::Validation(_) | CoreError::Window(_) => StatusCode::BAD_REQUEST,
        CoreError::CheckIn(e) => match e {
            CheckInError::AlreadyCheckedInToday { .. } | CheckInError::OutOfOrder { .. } => {
                StatusCode::CONFLICT
            }
            CheckInError::WindowClosed { .. } => StatusCode::FORBIDDEN,
            CheckInError::VerificationRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CheckInError::CorruptStreak { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        },
        CoreError::ConstraintViolation(_) => StatusCode::CONFLICT,
        CoreError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        CoreError::Repository(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
