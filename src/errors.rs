use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while authoring or acting on a schedule.
///
/// Persisted schedules that fail to parse are never reported through this
/// type by the read paths; they degrade to defaults instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("select at least one day")]
    NoDaysSelected,

    #[error("day must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidDay(u8),

    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("malformed schedule: {0}")]
    Malformed(String),

    #[error("cannot complete a task scheduled for the future")]
    FutureTask,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
