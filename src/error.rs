// Error types: domain errors raised by the controller, and the HTTP-facing
// AppError used by the Axum handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::Mode;

/// Failures of a keyword submission. `Display` is the exact text shown in
/// the error banner; the dispatch cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
    #[error("{}", .0.empty_input_message())]
    EmptyInput(Mode),
    #[error("{}", .mode.failure_message())]
    Dispatch { mode: Mode, cause: anyhow::Error },
}

impl KeywordError {
    pub fn mode(&self) -> Mode {
        match self {
            KeywordError::EmptyInput(mode) => *mode,
            KeywordError::Dispatch { mode, .. } => *mode,
        }
    }
}

// Application error returned by handlers
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, error_message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
