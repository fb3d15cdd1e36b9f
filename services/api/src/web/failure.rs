//! services/api/src/web/failure.rs
//!
//! The JSON error body every handler returns, and the mapping from port errors to it.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use subscription_core::ports::PortError;
use tracing::error;
use utoipa::ToSchema;

/// `{ "error": "...", "details": "..." }`. `details` only appears on server failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type Failure = (StatusCode, Json<ErrorBody>);

pub fn bad_request(message: &str) -> Failure {
    failure(StatusCode::BAD_REQUEST, message, None)
}

pub fn not_found(message: &str) -> Failure {
    failure(StatusCode::NOT_FOUND, message, None)
}

/// Logs and wraps an unexpected failure. `message` is what the client sees.
pub fn internal(message: &str, details: String) -> Failure {
    error!("{}: {}", message, details);
    failure(StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
}

/// Maps a failed report lookup onto 400 / 404 / 500.
pub fn load_failure(err: PortError) -> Failure {
    match err {
        PortError::InvalidId(_) => bad_request("Invalid report ID"),
        PortError::NotFound(_) => not_found("Report not found"),
        PortError::Unexpected(details) => internal("Failed to fetch report", details),
    }
}

fn failure(status: StatusCode, message: &str, details: Option<String>) -> Failure {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
            details,
        }),
    )
}
