use async_trait::async_trait;

use crate::schedule::{CinemaId, MovieId, Period, ScheduleRecord};

use super::Result;

/// Read access to the schedule table.
///
/// Implementations return records in whatever order the backend produces;
/// callers that need a stable order sort the result themselves.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Gets every record in a cinema's partition.
    async fn query_by_partition(&self, cinema_id: CinemaId) -> Result<Vec<ScheduleRecord>>;

    /// Gets the record for an exact (cinema, movie) key.
    async fn get_by_key(
        &self,
        cinema_id: CinemaId,
        movie_id: &MovieId,
    ) -> Result<Option<ScheduleRecord>>;

    /// Gets the records of a cinema whose period matches, via the period index.
    async fn query_by_partition_and_period(
        &self,
        cinema_id: CinemaId,
        period: &Period,
    ) -> Result<Vec<ScheduleRecord>>;
}
