use std::future::Future;
use std::sync::Arc;

use backon::Retryable;
use serde::Serialize;
use tracing::{debug, warn};

use crate::schedule::ScheduleRecord;
use crate::storage::{self, ScheduleStore};

use super::policy::RetryPolicy;
use super::requests::{PeriodRequest, ScheduleRequest};
use super::sorting::{sort_by_movie, sort_by_period};
use super::{ResolveError, Result};

/// Outcome of [`ScheduleResolver::resolve_schedule`].
///
/// Serializes as a JSON array for a cinema and as a single object for a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScheduleResult {
    Cinema(Vec<ScheduleRecord>),
    Movie(ScheduleRecord),
}

impl ScheduleResult {
    /// The resolved records, in order.
    pub fn records(&self) -> &[ScheduleRecord] {
        match self {
            ScheduleResult::Cinema(records) => records,
            ScheduleResult::Movie(record) => std::slice::from_ref(record),
        }
    }
}

/// Turns validated requests into store calls and shapes the results.
///
/// Stateless apart from its store handle, so one instance serves all requests.
pub struct ScheduleResolver {
    store: Arc<dyn ScheduleStore>,
    policy: RetryPolicy,
}

impl ScheduleResolver {
    pub fn new(store: Arc<dyn ScheduleStore>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    /// Resolves a cinema's full schedule, or one movie at that cinema.
    ///
    /// A cinema with no records resolves to an empty list. A missing movie is
    /// [`ResolveError::NotFound`].
    pub async fn resolve_schedule(&self, request: &ScheduleRequest) -> Result<ScheduleResult> {
        let cinema_id = request.cinema_id();

        match request.movie_id() {
            None => {
                let mut records = self
                    .with_retry("query_by_partition", || {
                        self.store.query_by_partition(cinema_id)
                    })
                    .await?;
                sort_by_movie(&mut records);
                debug!(%cinema_id, count = records.len(), "Resolved cinema schedule");
                Ok(ScheduleResult::Cinema(records))
            }
            Some(movie_id) => {
                let record = self
                    .with_retry("get_by_key", || self.store.get_by_key(cinema_id, movie_id))
                    .await?;
                debug!(%cinema_id, %movie_id, found = record.is_some(), "Resolved movie schedule");
                record
                    .map(ScheduleResult::Movie)
                    .ok_or_else(|| ResolveError::NotFound {
                        cinema_id,
                        movie_id: movie_id.clone(),
                    })
            }
        }
    }

    /// Resolves the records of a cinema in one period, through the period index.
    pub async fn resolve_by_period(&self, request: &PeriodRequest) -> Result<Vec<ScheduleRecord>> {
        let cinema_id = request.cinema_id();
        let period = request.period();

        let mut records = self
            .with_retry("query_by_partition_and_period", || {
                self.store.query_by_partition_and_period(cinema_id, period)
            })
            .await?;
        sort_by_period(&mut records);
        debug!(%cinema_id, %period, count = records.len(), "Resolved period schedule");
        Ok(records)
    }

    /// Runs one store call under the policy's timeout and retry budget.
    ///
    /// Dropping the returned future abandons the in-flight attempt and any
    /// pending backoff, so a disconnected client never triggers a retry.
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = storage::Result<T>>,
    {
        let timeout = self.policy.timeout;

        (|| {
            let attempt = call();
            async move {
                match tokio::time::timeout(timeout, attempt).await {
                    Ok(result) => result.map_err(|error| {
                        warn!(operation, %error, "Schedule store call failed");
                        ResolveError::from(error)
                    }),
                    Err(_) => Err(ResolveError::Transient(format!(
                        "{operation} timed out after {}ms",
                        timeout.as_millis()
                    ))),
                }
            }
        })
        .retry(self.policy.backoff())
        .when(ResolveError::is_transient)
        .notify(|error, delay| {
            warn!(
                operation,
                %error,
                delay_ms = delay.as_millis() as u64,
                "Retrying schedule store call"
            );
        })
        .await
    }
}
