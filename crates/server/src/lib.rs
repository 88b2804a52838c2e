use axum::{Json, http::StatusCode, response::IntoResponse};
use spv_errors::{Error, ErrorResponse};

pub use server::{ServerState, run_with_listener, spawn_with_listener};

mod server;
mod transactions;
mod users;

/// Transport-side wrapper around a classified engine error.
///
/// Turning it into a response consults the error's properties and kind:
/// `status_code` and `code` are used verbatim when present, internal
/// failures answer with a generic message, and the full chain goes to
/// the log either way.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let response = ErrorResponse::from_error(&self.0);
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                "HTTP {} error-code {}\n{}",
                response.status,
                response.code,
                self.0.log_format()
            );
        } else {
            tracing::warn!(
                "HTTP {} error-code {}: {}",
                response.status,
                response.code,
                self.0
            );
        }

        (status, Json(response)).into_response()
    }
}
