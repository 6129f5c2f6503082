#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("expected stop distance record as 'name:daytime:evening', found '{0}'")]
    InvalidStopDistance(String),
    #[error("stop '{0}' appears more than once in the distance table")]
    DuplicateStop(String),
    #[error("expected schedule key as 'routeNumber/id', found '{0}'")]
    InvalidScheduleKey(String),
}
