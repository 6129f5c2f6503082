mod clock_time;
mod time_error;
pub mod time_ops;

pub use clock_time::{ClockTime, MINUTES_PER_DAY};
pub use time_error::TimeError;
pub use time_ops::{add_time, format_time_as_string, subtract_time};
