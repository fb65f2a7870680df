//! Storage backend implementations.
//!
//! Concrete implementations of `cinemas_core::storage::ScheduleStore`,
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory`: in-memory backend serving the seed schedules
//!
//! Build with the in-memory backend:
//! ```bash
//! cargo run -p cinemas --no-default-features --features inmemory
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbScheduleStore;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryScheduleStore;
