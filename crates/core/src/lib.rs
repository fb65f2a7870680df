pub mod query;
pub mod schedule;
pub mod storage;
