//! DynamoDB schedule store.
//!
//! Implements `ScheduleStore` from `cinemas_core::storage` with GetItem for
//! point lookups and paged Query calls for partition and period reads.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use cinemas_core::schedule::{CinemaId, MovieId, Period, ScheduleRecord};
use cinemas_core::storage::{Result, ScheduleStore};

use super::conversions::item_to_record;
use super::error::{map_get_item_error, map_query_error};
use super::keys;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed schedule store.
///
/// Reads use the table's default eventually consistent mode.
pub struct DynamoDbScheduleStore {
    client: Client,
    table_name: String,
}

impl DynamoDbScheduleStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Runs a key-condition query to completion, following `LastEvaluatedKey`.
    async fn query_all(
        &self,
        index_name: Option<&str>,
        condition: &str,
        names: &[&str],
        values: Vec<(&str, AttributeValue)>,
    ) -> Result<Vec<ScheduleRecord>> {
        let mut records = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .set_index_name(index_name.map(str::to_string))
                .key_condition_expression(condition)
                .set_exclusive_start_key(start_key.take());
            for name in names {
                request = request.expression_attribute_names(format!("#{name}"), *name);
            }
            for (placeholder, value) in &values {
                request = request.expression_attribute_values(*placeholder, value.clone());
            }

            let output = request.send().await.map_err(map_query_error)?;

            for item in output.items() {
                records.push(item_to_record(item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => {
                    tracing::trace!(
                        table = %self.table_name,
                        fetched = records.len(),
                        "Following query pagination"
                    );
                    start_key = Some(key);
                }
                _ => break,
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl ScheduleStore for DynamoDbScheduleStore {
    async fn query_by_partition(&self, cinema_id: CinemaId) -> Result<Vec<ScheduleRecord>> {
        self.query_all(
            None,
            keys::PARTITION_CONDITION,
            &[keys::CINEMA_ID],
            vec![(":cinemaId", keys::cinema_id_value(cinema_id))],
        )
        .await
    }

    async fn get_by_key(
        &self,
        cinema_id: CinemaId,
        movie_id: &MovieId,
    ) -> Result<Option<ScheduleRecord>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(cinema_id, movie_id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn query_by_partition_and_period(
        &self,
        cinema_id: CinemaId,
        period: &Period,
    ) -> Result<Vec<ScheduleRecord>> {
        self.query_all(
            Some(keys::PERIOD_INDEX),
            keys::PERIOD_CONDITION,
            &[keys::CINEMA_ID, keys::PERIOD],
            vec![
                (":cinemaId", keys::cinema_id_value(cinema_id)),
                (":period", keys::period_value(period)),
            ],
        )
        .await
    }
}
