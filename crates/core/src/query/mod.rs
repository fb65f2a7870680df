mod error;
mod http_mapping;
mod policy;
mod requests;
mod resolver;
mod sorting;

pub use error::{ResolveError, Result};
pub use http_mapping::resolve_error_to_status_code;
pub use policy::RetryPolicy;
pub use requests::{PeriodRequest, ScheduleRequest};
pub use resolver::{ScheduleResolver, ScheduleResult};
pub use sorting::{sort_by_movie, sort_by_period};
