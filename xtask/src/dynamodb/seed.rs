//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use backon::{BackoffBuilder, ExponentialBuilder};
use cinemas_core::schedule::ScheduleRecord;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// BatchWriteItem accepts at most 25 requests per call.
const BATCH_SIZE: usize = 25;

/// How many times unprocessed items are resubmitted before giving up.
const MAX_RESUBMISSIONS: usize = 5;

/// Convert a ScheduleRecord to a DynamoDB item.
pub fn record_to_item(record: &ScheduleRecord) -> HashMap<String, AttributeValue> {
    let mut item: HashMap<String, AttributeValue> = record
        .attributes()
        .iter()
        .map(|(key, value)| (key.clone(), json_to_attribute(value)))
        .collect();

    item.insert(
        "cinemaId".to_string(),
        AttributeValue::N(record.cinema_id.to_string()),
    );
    item.insert(
        "movieId".to_string(),
        AttributeValue::S(record.movie_id.as_str().to_string()),
    );
    // Records without a period stay out of the periodIx index.
    if let Some(period) = &record.period {
        item.insert(
            "period".to_string(),
            AttributeValue::S(period.as_str().to_string()),
        );
    }

    item
}

/// Convert a JSON value into the matching DynamoDB attribute.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

fn write_requests(records: &[ScheduleRecord]) -> Result<Vec<WriteRequest>> {
    records
        .iter()
        .map(|record| {
            let put = PutRequest::builder()
                .set_item(Some(record_to_item(record)))
                .build()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
            Ok(WriteRequest::builder().put_request(put).build())
        })
        .collect()
}

/// Backoff between resubmissions of unprocessed items.
fn resubmission_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(MAX_RESUBMISSIONS)
        .with_jitter()
}

/// Write one batch, resubmitting whatever the service reports as unprocessed.
async fn write_batch(client: &Client, table_name: &str, requests: Vec<WriteRequest>) -> Result<()> {
    let mut pending = requests;
    let mut attempts = 0;

    for (attempt, delay) in std::iter::once(Duration::ZERO)
        .chain(resubmission_backoff().build())
        .enumerate()
    {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
        }
        attempts = attempt + 1;

        let response = client
            .batch_write_item()
            .request_items(table_name, pending)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        pending = response
            .unprocessed_items()
            .and_then(|items| items.get(table_name))
            .cloned()
            .unwrap_or_default();

        if pending.is_empty() {
            return Ok(());
        }
    }

    Err(DynamodbError::UnprocessedItems {
        remaining: pending.len(),
        attempts,
    })
}

/// Insert records into DynamoDB in batches.
pub async fn seed_records(
    client: &Client,
    table_name: &str,
    records: &[ScheduleRecord],
) -> Result<usize> {
    let mut inserted = 0;

    for chunk in records.chunks(BATCH_SIZE) {
        write_batch(client, table_name, write_requests(chunk)?).await?;
        inserted += chunk.len();
    }

    Ok(inserted)
}

/// Format a record for the preview list.
pub fn format_record(record: &ScheduleRecord) -> String {
    let title = record
        .attributes()
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("(untitled)");
    let period = record
        .period
        .as_ref()
        .map(|p| p.as_str())
        .unwrap_or("no period");

    format!(
        "{} / {} - {} ({})",
        record.cinema_id, record.movie_id, title, period
    )
}
