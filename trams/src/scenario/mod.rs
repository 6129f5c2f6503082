mod game_scenario;
mod stop_time_row;

pub use game_scenario::Scenario;
pub use stop_time_row::StopTimeRow;
