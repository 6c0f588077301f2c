//! Mapping from storage errors onto plain-text HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use aura_core::TrackerError;

/// Wraps [`TrackerError`] so handlers can return it with `?`.
///
/// Validation failures become 400, lookups that miss become 404, everything
/// from the storage layer itself becomes an opaque 500 (details go to the
/// log, not the client).
#[derive(Debug)]
pub struct AppError(pub TrackerError);

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TrackerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TrackerError::EpisodeNotFound(_)
            | TrackerError::NotFound { .. }
            | TrackerError::UnknownTable(_) => StatusCode::NOT_FOUND,
            TrackerError::Sqlite(_) | TrackerError::Pool(_) | TrackerError::Migration { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            (status, "internal error".to_string()).into_response()
        } else {
            (status, self.0.to_string()).into_response()
        }
    }
}
