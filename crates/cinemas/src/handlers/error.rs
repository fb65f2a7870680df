use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinemas_core::query::{resolve_error_to_status_code, ResolveError};
use serde_json::json;

/// Handler error rendered as `{ "error": <message> }`.
///
/// Server-side failures are logged with full detail; the body only ever
/// carries the stable public message.
pub struct AppError(pub ResolveError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = resolve_error_to_status_code(&self.0);
        let status_code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self.0 {
            ResolveError::Transient(_) | ResolveError::Internal(_) => {
                tracing::error!(error = %self.0, status = code, "Schedule request failed");
            }
            ResolveError::InvalidRequest(_) | ResolveError::NotFound { .. } => {
                tracing::warn!(error = %self.0, status = code, "Schedule request rejected");
            }
        }

        (status_code, Json(json!({ "error": self.0.public_message() }))).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        Self(err)
    }
}
