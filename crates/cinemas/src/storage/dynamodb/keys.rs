//! DynamoDB key layout for the schedule table.
//!
//! Pure functions and constants. The table is keyed by `cinemaId` (N) and
//! `movieId` (S); the `periodIx` local secondary index re-sorts each cinema
//! partition by `period` (S).

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use cinemas_core::schedule::{CinemaId, MovieId, Period};

// ============================================================================
// Attribute and index names
// ============================================================================

pub const CINEMA_ID: &str = "cinemaId";
pub const MOVIE_ID: &str = "movieId";
pub const PERIOD: &str = "period";

pub const PERIOD_INDEX: &str = "periodIx";

// ============================================================================
// Key conditions
// ============================================================================

/// Key condition for a whole cinema partition.
pub const PARTITION_CONDITION: &str = "#cinemaId = :cinemaId";

/// Key condition for one period within a cinema partition.
pub const PERIOD_CONDITION: &str = "#cinemaId = :cinemaId AND #period = :period";

// ============================================================================
// Attribute values
// ============================================================================

/// Partition key value. Numbers travel as strings on the wire.
pub fn cinema_id_value(cinema_id: CinemaId) -> AttributeValue {
    AttributeValue::N(cinema_id.to_string())
}

pub fn movie_id_value(movie_id: &MovieId) -> AttributeValue {
    AttributeValue::S(movie_id.as_str().to_string())
}

pub fn period_value(period: &Period) -> AttributeValue {
    AttributeValue::S(period.as_str().to_string())
}

/// Primary key of one schedule item.
pub fn primary_key(cinema_id: CinemaId, movie_id: &MovieId) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (CINEMA_ID.to_string(), cinema_id_value(cinema_id)),
        (MOVIE_ID.to_string(), movie_id_value(movie_id)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cinema_id_value_is_number() {
        assert_eq!(
            cinema_id_value(CinemaId::new(1001)),
            AttributeValue::N("1001".to_string())
        );
    }

    #[test]
    fn test_primary_key() {
        let key = primary_key(CinemaId::new(1001), &MovieId::new("c5002").unwrap());

        assert_eq!(key.len(), 2);
        assert_eq!(key.get("cinemaId"), Some(&AttributeValue::N("1001".into())));
        assert_eq!(key.get("movieId"), Some(&AttributeValue::S("c5002".into())));
    }

    #[test]
    fn test_period_value() {
        assert_eq!(
            period_value(&Period::new("evening").unwrap()),
            AttributeValue::S("evening".to_string())
        );
    }

    #[test]
    fn test_conditions_use_placeholder_names() {
        for condition in [PARTITION_CONDITION, PERIOD_CONDITION] {
            assert!(condition.contains("#cinemaId = :cinemaId"));
        }
        assert!(PERIOD_CONDITION.ends_with("#period = :period"));
    }
}
