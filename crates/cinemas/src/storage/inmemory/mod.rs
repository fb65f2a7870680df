//! In-memory storage backend.
//!
//! Keeps schedule records in ordered maps behind an `Arc<RwLock<_>>`. Used by
//! the `inmemory` feature and by the router tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinemas_core::schedule::seed_schedules;
//!
//! let store = InMemoryScheduleStore::with_records(seed_schedules()).await;
//! ```

mod repository;

pub use repository::InMemoryScheduleStore;
