use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use loader::LoaderError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Loader(LoaderError::SourceUnavailable { path }) => {
                tracing::warn!(path = %path.display(), "Price data file is missing.");
                (
                    StatusCode::NOT_FOUND,
                    "Data file not found on server".to_string(),
                )
            }
            AppError::Loader(loader_err) => {
                tracing::error!(error = ?loader_err, "Loader error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The price data could not be read".to_string(),
                )
            }
            AppError::Task(join_err) => {
                tracing::error!(error = ?join_err, "Blocking task failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
