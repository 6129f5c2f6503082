mod generator_ops;
mod schedule_error;
mod schedule_generator;
mod schedule_id_sequence;

pub use generator_ops::{cumulative_offsets, round_trip_duration, tour_count};
pub use schedule_error::ScheduleError;
pub use schedule_generator::ScheduleGenerator;
pub use schedule_id_sequence::ScheduleIdSequence;
