mod position_resolver;
mod vehicle_position;

pub use position_resolver::{locate, resolve_position};
pub use vehicle_position::VehiclePosition;
