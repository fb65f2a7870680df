mod error;
mod mock_data;
mod types;

pub use error::ScheduleError;
pub use mock_data::seed_schedules;
pub use types::{CinemaId, MovieId, Period, ScheduleRecord, RESERVED_ATTRIBUTES};
