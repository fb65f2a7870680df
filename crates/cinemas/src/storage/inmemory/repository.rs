//! In-memory schedule store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cinemas_core::schedule::{CinemaId, MovieId, Period, ScheduleRecord};
use cinemas_core::storage::{Result, ScheduleStore};

type Partitions = BTreeMap<CinemaId, BTreeMap<MovieId, ScheduleRecord>>;

/// In-memory schedule store for tests and local development.
///
/// Records are grouped per cinema and kept in movie ID order, like the table's
/// partition and sort keys. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    partitions: Arc<RwLock<Partitions>>,
}

impl InMemoryScheduleStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub async fn with_records(records: impl IntoIterator<Item = ScheduleRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.put(record).await;
        }
        store
    }

    /// Writes a record, overwriting any record with the same key.
    pub async fn put(&self, record: ScheduleRecord) {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(record.cinema_id)
            .or_default()
            .insert(record.movie_id.clone(), record);
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn query_by_partition(&self, cinema_id: CinemaId) -> Result<Vec<ScheduleRecord>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&cinema_id)
            .map(|movies| movies.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_by_key(
        &self,
        cinema_id: CinemaId,
        movie_id: &MovieId,
    ) -> Result<Option<ScheduleRecord>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&cinema_id)
            .and_then(|movies| movies.get(movie_id))
            .cloned())
    }

    async fn query_by_partition_and_period(
        &self,
        cinema_id: CinemaId,
        period: &Period,
    ) -> Result<Vec<ScheduleRecord>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&cinema_id)
            .map(|movies| {
                movies
                    .values()
                    .filter(|record| record.period.as_ref() == Some(period))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
