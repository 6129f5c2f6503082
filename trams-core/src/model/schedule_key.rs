use std::{fmt::Display, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use super::ModelError;

/// identifies a schedule (tour) within a route. the slash-delimited string form
/// `routeNumber/id` is only used when reading or writing records.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleKey {
    pub route_number: String,
    pub id: u32,
}

impl ScheduleKey {
    pub const SEPARATOR: char = '/';

    pub fn new(route_number: &str, id: u32) -> ScheduleKey {
        ScheduleKey {
            route_number: route_number.to_string(),
            id,
        }
    }
}

impl Display for ScheduleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.route_number, Self::SEPARATOR, self.id)
    }
}

impl FromStr for ScheduleKey {
    type Err = ModelError;

    /// splits on the last separator so route numbers may themselves contain one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (route_number, id_str) = s
            .rsplit_once(Self::SEPARATOR)
            .ok_or_else(|| ModelError::InvalidScheduleKey(s.to_string()))?;
        if route_number.is_empty() {
            return Err(ModelError::InvalidScheduleKey(s.to_string()));
        }
        let id = id_str
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidScheduleKey(s.to_string()))?;
        Ok(ScheduleKey::new(route_number, id))
    }
}

impl Serialize for ScheduleKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key_str: String = String::deserialize(deserializer)?;
        ScheduleKey::from_str(&key_str).map_err(D::Error::custom)
    }
}
