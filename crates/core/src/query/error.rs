use thiserror::Error;

use crate::schedule::{CinemaId, MovieId, ScheduleError};
use crate::storage::StoreError;

/// Errors surfaced by schedule resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Movie {movie_id} is not scheduled at cinema {cinema_id}")]
    NotFound {
        cinema_id: CinemaId,
        movie_id: MovieId,
    },
    #[error("Transient store failure: {0}")]
    Transient(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolveError {
    /// Whether the failed store call is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, ResolveError::Transient(_))
    }

    /// The message shown to API callers.
    ///
    /// Store failures collapse to a fixed string; the detail only goes to logs.
    pub fn public_message(&self) -> String {
        match self {
            ResolveError::InvalidRequest(message) => message.clone(),
            ResolveError::NotFound { .. } => self.to_string(),
            ResolveError::Transient(_) => "Schedule service temporarily unavailable".to_string(),
            ResolveError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<ScheduleError> for ResolveError {
    fn from(error: ScheduleError) -> Self {
        ResolveError::InvalidRequest(error.to_string())
    }
}

impl From<StoreError> for ResolveError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(_) | StoreError::Throttled(_) => {
                ResolveError::Transient(error.to_string())
            }
            StoreError::MalformedKey(_) => {
                ResolveError::InvalidRequest("Malformed schedule key".to_string())
            }
            StoreError::QueryFailed(_) | StoreError::InvalidData(_) => {
                ResolveError::Internal(error.to_string())
            }
        }
    }
}

/// Result type for schedule resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
