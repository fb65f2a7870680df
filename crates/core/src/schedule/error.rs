use thiserror::Error;

/// Errors that can occur when validating schedule identifiers or records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("cinemaId must be an integer, got '{0}'")]
    InvalidCinemaId(String),
    #[error("movieId cannot be empty")]
    EmptyMovieId,
    #[error("period cannot be empty")]
    EmptyPeriod,
    #[error("Invalid schedule record: {0}")]
    InvalidRecord(String),
}
