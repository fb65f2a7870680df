//! Pure functions for mapping resolve errors to HTTP status codes.

use super::ResolveError;

/// Maps a [`ResolveError`] to an HTTP status code.
///
/// - `InvalidRequest` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Transient` -> 500 (Internal Server Error), retries are already spent
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use cinemas_core::query::{resolve_error_to_status_code, ResolveError};
///
/// let error = ResolveError::InvalidRequest("cinemaId must be an integer, got 'abc'".into());
/// assert_eq!(resolve_error_to_status_code(&error), 400);
/// ```
pub fn resolve_error_to_status_code(error: &ResolveError) -> u16 {
    match error {
        ResolveError::InvalidRequest(_) => 400,
        ResolveError::NotFound { .. } => 404,
        ResolveError::Transient(_) => 500,
        ResolveError::Internal(_) => 500,
    }
}
