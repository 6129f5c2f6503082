mod allocation;
mod frequency_pattern;
mod model_error;
mod route;
mod schedule;
mod schedule_key;
mod stop_distance;
mod timetable;
mod vehicle;

pub use allocation::{AdditionalTour, Allocation};
pub use frequency_pattern::FrequencyPattern;
pub use model_error::ModelError;
pub use route::Route;
pub use schedule::{Schedule, Service, StopTime};
pub use schedule_key::ScheduleKey;
pub use stop_distance::{DistanceProfile, StopDistance, StopDistanceTable};
pub use timetable::Timetable;
pub use vehicle::{DelayPolicy, Vehicle};
