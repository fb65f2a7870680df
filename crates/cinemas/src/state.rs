//! Application state with store-based schedule resolution.
//!
//! The shared state handed to every request handler. The schedule store
//! behind the resolver is selected at compile time via feature flags.

use std::sync::Arc;

use cinemas_core::query::{RetryPolicy, ScheduleResolver};
use cinemas_core::storage::ScheduleStore;

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable a storage feature: 'dynamodb' or 'inmemory'");

/// Shared application state.
///
/// Cheap to clone; every handler shares the same resolver and store handle.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ScheduleResolver>,
}

impl AppState {
    /// Creates state resolving against the given store.
    pub fn with_store(store: Arc<dyn ScheduleStore>, policy: RetryPolicy) -> Self {
        Self {
            resolver: Arc::new(ScheduleResolver::new(store, policy)),
        }
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "dynamodb")]
mod dynamodb_backend {
    use super::*;
    use crate::storage::DynamoDbScheduleStore;

    impl AppState {
        /// Creates AppState backed by the DynamoDB schedule table.
        ///
        /// The client is built here from explicit configuration; nothing
        /// else in the process holds a DynamoDB handle.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.region.clone()));
            if let Some(endpoint_url) = &config.endpoint_url {
                loader = loader.endpoint_url(endpoint_url);
            }
            let aws_config = loader.load().await;
            let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);
            let store = DynamoDbScheduleStore::new(dynamodb_client, config.table_name.clone());

            tracing::info!(
                table = store.table_name(),
                region = %config.region,
                endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
                "Using DynamoDB schedule store"
            );

            Ok(Self::with_store(Arc::new(store), config.retry_policy()))
        }
    }
}

#[cfg(all(feature = "inmemory", not(feature = "dynamodb")))]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryScheduleStore;
    use cinemas_core::schedule::seed_schedules;

    impl AppState {
        /// Creates AppState backed by an in-memory store holding the seed schedules.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let seeds = seed_schedules();
            tracing::info!(records = seeds.len(), "Using in-memory schedule store");

            let store = InMemoryScheduleStore::with_records(seeds).await;
            Ok(Self::with_store(Arc::new(store), config.retry_policy()))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
