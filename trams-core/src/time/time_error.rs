#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("expected a time of day in HH:mm format, found '{0}'")]
    InvalidFormat(String),
    #[error("hour {0} is out of range [0, 23]")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range [0, 59]")]
    MinuteOutOfRange(u32),
}
