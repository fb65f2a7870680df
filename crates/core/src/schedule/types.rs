use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ScheduleError;

/// Attribute names owned by the typed key fields of a [`ScheduleRecord`].
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["cinemaId", "movieId", "period"];

/// Identifies a cinema location. Partition key of the schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CinemaId(i64);

impl CinemaId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for CinemaId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ScheduleError::InvalidCinemaId(s.to_string()))
    }
}

impl fmt::Display for CinemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a movie within a cinema. Sort key of the schedule table.
///
/// Ordering is byte-wise lexicographic, which is how the store orders string
/// sort keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovieId(String);

impl MovieId {
    /// Creates a movie ID, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ScheduleError::EmptyMovieId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MovieId {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A showtime window or date bucket. Sort key of the period index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(String);

impl Period {
    /// Creates a period, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ScheduleError::EmptyPeriod);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Period {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One movie scheduled at one cinema.
///
/// The key fields are typed. Everything else (title, rating, showtimes, ...)
/// is kept as an open JSON map and flattened back into the object on
/// serialization, so unknown attributes survive a round trip through the API.
/// Records without a `period` do not appear in the period index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl ScheduleRecord {
    /// Creates a record with no period and no payload attributes.
    pub fn new(cinema_id: CinemaId, movie_id: MovieId) -> Self {
        Self {
            cinema_id,
            movie_id,
            period: None,
            attributes: Map::new(),
        }
    }

    /// Sets the period used by the period index.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Adds a payload attribute. Reserved key names are ignored; set the
    /// typed fields instead.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Adds every non-reserved entry of `attributes` to the payload.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        for (key, value) in attributes {
            if !is_reserved(&key) {
                self.attributes.insert(key, value);
            }
        }
        self
    }

    /// The opaque payload attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Validates an arbitrary JSON value into a record.
    pub fn from_json(value: Value) -> Result<Self, ScheduleError> {
        serde_json::from_value(value).map_err(|e| ScheduleError::InvalidRecord(e.to_string()))
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&key)
}
