//! DynamoDB attribute conversion functions.
//!
//! Pure functions turning DynamoDB items into schedule records. Key
//! attributes are type-checked; everything else is carried over as JSON.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use cinemas_core::schedule::{CinemaId, MovieId, Period, ScheduleRecord, RESERVED_ATTRIBUTES};
use cinemas_core::storage::StoreError;
use serde_json::{Map, Number, Value};

use super::keys::{CINEMA_ID, MOVIE_ID, PERIOD};

/// Convert a DynamoDB item to a ScheduleRecord.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<ScheduleRecord, StoreError> {
    let cinema_id = get_cinema_id(item)?;
    let movie_id = MovieId::new(get_string(item, MOVIE_ID)?)
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
    let period = get_optional_string(item, PERIOD)?
        .map(Period::new)
        .transpose()
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;

    let mut attributes = Map::new();
    for (key, value) in item {
        if RESERVED_ATTRIBUTES.contains(&key.as_str()) {
            continue;
        }
        attributes.insert(key.clone(), attribute_to_json(value)?);
    }

    let record = ScheduleRecord::new(cinema_id, movie_id).with_attributes(attributes);
    Ok(match period {
        Some(period) => record.with_period(period),
        None => record,
    })
}

/// Convert a DynamoDB attribute value to plain JSON.
///
/// Sets become arrays. Binary values have no JSON form and are rejected.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, StoreError> {
    let json = match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n)?,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(
            list.iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
                .collect::<Result<_, StoreError>>()?,
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| number_to_json(n))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(_) | AttributeValue::Bs(_) => {
            return Err(StoreError::InvalidData(
                "Binary attributes are not supported".to_string(),
            ))
        }
        other => {
            return Err(StoreError::InvalidData(format!(
                "Unsupported attribute type: {other:?}"
            )))
        }
    };
    Ok(json)
}

/// Significant decimal digits an f64 always round-trips.
const F64_EXACT_DIGITS: usize = 15;

/// Convert a DynamoDB number (up to 38 digits) to JSON.
///
/// Values that fit `i64`, `u64` or an exact `f64` become JSON numbers. Wider
/// values keep their decimal text as a JSON string.
fn number_to_json(n: &str) -> Result<Value, StoreError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::Number(Number::from(i)));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::Number(Number::from(u)));
    }

    let number = n
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::InvalidData(format!("Invalid number: {n}")))?;

    if significant_digits(n) > F64_EXACT_DIGITS {
        return Ok(Value::String(n.trim().to_string()));
    }
    Ok(Value::Number(number))
}

fn significant_digits(n: &str) -> usize {
    let mantissa = n.split(['e', 'E']).next().unwrap_or_default();
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');
    let digits = if mantissa.contains('.') {
        digits.trim_end_matches('0')
    } else {
        digits
    };
    digits.len()
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get the required numeric partition key.
fn get_cinema_id(item: &HashMap<String, AttributeValue>) -> Result<CinemaId, StoreError> {
    item.get(CINEMA_ID)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<CinemaId>().ok())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {CINEMA_ID}")))
}

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {key}")))
}

/// Get an optional string attribute. Present with another type is an error.
fn get_optional_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<String>, StoreError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(_) => Err(StoreError::InvalidData(format!(
            "Missing or invalid field: {key}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_item() -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("cinemaId".to_string(), AttributeValue::N("1001".into())),
            ("movieId".to_string(), AttributeValue::S("c5001".into())),
            ("period".to_string(), AttributeValue::S("evening".into())),
            ("title".to_string(), AttributeValue::S("The Lighthouse Keeper".into())),
            (
                "showtimes".to_string(),
                AttributeValue::L(vec![
                    AttributeValue::S("19:00".into()),
                    AttributeValue::S("21:30".into()),
                ]),
            ),
            ("runtime".to_string(), AttributeValue::N("112".into())),
        ])
    }

    #[test]
    fn test_item_to_record() {
        let record = item_to_record(&sample_item()).unwrap();

        assert_eq!(record.cinema_id, CinemaId::new(1001));
        assert_eq!(record.movie_id.as_str(), "c5001");
        assert_eq!(record.period.as_ref().map(Period::as_str), Some("evening"));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "cinemaId": 1001,
                "movieId": "c5001",
                "period": "evening",
                "title": "The Lighthouse Keeper",
                "showtimes": ["19:00", "21:30"],
                "runtime": 112
            })
        );
    }

    #[test]
    fn test_item_without_period() {
        let mut item = sample_item();
        item.remove("period");

        let record = item_to_record(&item).unwrap();
        assert_eq!(record.period, None);
    }

    #[test]
    fn test_missing_movie_id_is_invalid_data() {
        let mut item = sample_item();
        item.remove("movieId");

        assert_eq!(
            item_to_record(&item),
            Err(StoreError::InvalidData(
                "Missing or invalid field: movieId".to_string()
            ))
        );
    }

    #[test]
    fn test_string_cinema_id_is_invalid_data() {
        let mut item = sample_item();
        item.insert("cinemaId".to_string(), AttributeValue::S("1001".into()));

        assert_eq!(
            item_to_record(&item),
            Err(StoreError::InvalidData(
                "Missing or invalid field: cinemaId".to_string()
            ))
        );
    }

    #[test]
    fn test_numeric_period_is_invalid_data() {
        let mut item = sample_item();
        item.insert("period".to_string(), AttributeValue::N("3".into()));

        assert!(matches!(
            item_to_record(&item),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_attribute_to_json_nested() {
        let value = AttributeValue::M(HashMap::from([
            ("rating".to_string(), AttributeValue::S("PG".into())),
            ("score".to_string(), AttributeValue::N("7.5".into())),
            ("imax".to_string(), AttributeValue::Bool(true)),
            ("note".to_string(), AttributeValue::Null(true)),
            (
                "languages".to_string(),
                AttributeValue::Ss(vec!["en".into(), "es".into()]),
            ),
        ]));

        assert_eq!(
            attribute_to_json(&value).unwrap(),
            json!({
                "rating": "PG",
                "score": 7.5,
                "imax": true,
                "note": null,
                "languages": ["en", "es"]
            })
        );
    }

    #[test]
    fn test_wide_numbers_keep_their_digits() {
        assert_eq!(
            attribute_to_json(&AttributeValue::N("12345678901234567890".into())).unwrap(),
            json!(12345678901234567890u64)
        );
        assert_eq!(
            attribute_to_json(&AttributeValue::N("123456789012345678901234".into())).unwrap(),
            json!("123456789012345678901234")
        );
        assert_eq!(
            attribute_to_json(&AttributeValue::N("0.12345678901234567891".into())).unwrap(),
            json!("0.12345678901234567891")
        );
        assert_eq!(
            attribute_to_json(&AttributeValue::N("-9.5".into())).unwrap(),
            json!(-9.5)
        );
        assert_eq!(
            attribute_to_json(&AttributeValue::N("1.2500".into())).unwrap(),
            json!(1.25)
        );
    }

    #[test]
    fn test_attribute_to_json_rejects_bad_number() {
        assert!(attribute_to_json(&AttributeValue::N("twelve".into())).is_err());
    }
}
