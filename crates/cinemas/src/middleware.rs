//! Request-level middleware.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cinemas_core::query::ResolveError;

use crate::handlers::AppError;

/// Bounds the whole request, store retries included.
///
/// A request that runs past `limit` is answered like any other transient
/// store failure, so the client still gets the JSON error body.
pub async fn request_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => AppError(ResolveError::Transient(format!(
            "{path} exceeded the {}ms request deadline",
            limit.as_millis()
        )))
        .into_response(),
    }
}
