use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiFailure;

/// Failure kinds of the save endpoint. Both are terminal for the request;
/// neither carries internal detail onto the wire.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("Failed to save paste")]
    Storage(#[from] anyhow::Error),
}

impl SaveError {
    fn status(&self) -> StatusCode {
        match self {
            SaveError::EmptyContent => StatusCode::BAD_REQUEST,
            SaveError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SaveError {
    fn into_response(self) -> Response {
        if let SaveError::Storage(e) = &self {
            tracing::error!("failed to save paste. db_error: {}", e);
        }
        (self.status(), Json(ApiFailure::new(&self.to_string()))).into_response()
    }
}
