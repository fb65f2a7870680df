//! Validated inputs for schedule resolution.
//!
//! Parsing is pure. A request that fails here never reaches the store.

use crate::schedule::{CinemaId, MovieId, Period};

use super::Result;

/// A validated `resolve_schedule` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    cinema_id: CinemaId,
    movie_id: Option<MovieId>,
}

impl ScheduleRequest {
    /// Parses raw path and query parameters.
    ///
    /// An empty `movie_id` is treated the same as an absent one.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinemas_core::query::ScheduleRequest;
    ///
    /// let request = ScheduleRequest::parse("1001", Some("")).unwrap();
    /// assert!(request.movie_id().is_none());
    /// assert!(ScheduleRequest::parse("abc", None).is_err());
    /// ```
    pub fn parse(cinema_id: &str, movie_id: Option<&str>) -> Result<Self> {
        let cinema_id = cinema_id.parse::<CinemaId>()?;
        let movie_id = match movie_id {
            Some(id) if !id.is_empty() => Some(MovieId::new(id)?),
            _ => None,
        };
        Ok(Self {
            cinema_id,
            movie_id,
        })
    }

    /// Request for a whole cinema.
    pub fn cinema(cinema_id: CinemaId) -> Self {
        Self {
            cinema_id,
            movie_id: None,
        }
    }

    /// Request for one movie at a cinema.
    pub fn movie(cinema_id: CinemaId, movie_id: MovieId) -> Self {
        Self {
            cinema_id,
            movie_id: Some(movie_id),
        }
    }

    pub fn cinema_id(&self) -> CinemaId {
        self.cinema_id
    }

    pub fn movie_id(&self) -> Option<&MovieId> {
        self.movie_id.as_ref()
    }
}

/// A validated `resolve_by_period` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRequest {
    cinema_id: CinemaId,
    period: Period,
}

impl PeriodRequest {
    /// Parses raw path parameters. Both are required.
    pub fn parse(cinema_id: &str, period: &str) -> Result<Self> {
        Ok(Self {
            cinema_id: cinema_id.parse()?,
            period: Period::new(period)?,
        })
    }

    pub fn new(cinema_id: CinemaId, period: Period) -> Self {
        Self { cinema_id, period }
    }

    pub fn cinema_id(&self) -> CinemaId {
        self.cinema_id
    }

    pub fn period(&self) -> &Period {
        &self.period
    }
}
