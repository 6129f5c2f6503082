pub mod model;
pub mod position;
pub mod schedule;
pub mod simulation;
pub mod time;
