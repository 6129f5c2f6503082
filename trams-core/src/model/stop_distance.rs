use std::{collections::HashSet, fmt::Display, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use super::ModelError;
use crate::time::MINUTES_PER_DAY;

/// selects which of the two per-stop distance values apply to a trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceProfile {
    Daytime,
    Evening,
}

/// a single `name:daytime:evening` distance record. the two values are the
/// stop's offset in minutes along the scenario corridor for each profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopDistance {
    pub stop: String,
    pub daytime: i32,
    pub evening: i32,
}

impl StopDistance {
    pub const SEPARATOR: char = ':';

    pub fn offset(&self, profile: DistanceProfile) -> i32 {
        match profile {
            DistanceProfile::Daytime => self.daytime,
            DistanceProfile::Evening => self.evening,
        }
    }

    /// offsets must lie within one day either side of the corridor origin.
    pub fn is_within_a_day(&self) -> bool {
        self.daytime.unsigned_abs() <= MINUTES_PER_DAY
            && self.evening.unsigned_abs() <= MINUTES_PER_DAY
    }
}

impl Display for StopDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = Self::SEPARATOR;
        write!(f, "{}{sep}{}{sep}{}", self.stop, self.daytime, self.evening)
    }
}

impl FromStr for StopDistance {
    type Err = ModelError;

    /// parses from the right, so stop names may contain the separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidStopDistance(s.to_string());
        let mut parts = s.rsplitn(3, Self::SEPARATOR);
        let evening = parts.next().ok_or_else(invalid)?;
        let daytime = parts.next().ok_or_else(invalid)?;
        let stop = parts.next().ok_or_else(invalid)?;
        if stop.trim().is_empty() {
            return Err(invalid());
        }
        let record = StopDistance {
            stop: stop.trim().to_string(),
            daytime: daytime.trim().parse().map_err(|_| invalid())?,
            evening: evening.trim().parse().map_err(|_| invalid())?,
        };
        if !record.is_within_a_day() {
            return Err(invalid());
        }
        Ok(record)
    }
}

impl Serialize for StopDistance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StopDistance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record: String = String::deserialize(deserializer)?;
        StopDistance::from_str(&record).map_err(D::Error::custom)
    }
}

/// the scenario-wide distance table. the travel time between two stops is the
/// difference between their offsets, so it is symmetric in direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StopDistance>", into = "Vec<StopDistance>")]
pub struct StopDistanceTable {
    records: Vec<StopDistance>,
}

impl StopDistanceTable {
    /// builds a table from `name:daytime:evening` tokens.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<StopDistanceTable, ModelError> {
        let records = tokens
            .iter()
            .map(|token| StopDistance::from_str(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        StopDistanceTable::try_from(records)
    }

    pub fn get(&self, stop: &str) -> Option<&StopDistance> {
        self.records.iter().find(|r| r.stop == stop)
    }

    pub fn contains(&self, stop: &str) -> bool {
        self.get(stop).is_some()
    }

    /// travel time in minutes between two stops, or None if either is unknown.
    pub fn distance(&self, from: &str, to: &str, profile: DistanceProfile) -> Option<i32> {
        let src = self.get(from)?.offset(profile) as i64;
        let dst = self.get(to)?.offset(profile) as i64;
        i32::try_from((dst - src).abs()).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StopDistance> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<StopDistance>> for StopDistanceTable {
    type Error = ModelError;

    fn try_from(records: Vec<StopDistance>) -> Result<Self, Self::Error> {
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records.iter() {
            if !seen.insert(record.stop.as_str()) {
                return Err(ModelError::DuplicateStop(record.stop.clone()));
            }
            if !record.is_within_a_day() {
                return Err(ModelError::InvalidStopDistance(record.to_string()));
            }
        }
        Ok(StopDistanceTable { records })
    }
}

impl From<StopDistanceTable> for Vec<StopDistance> {
    fn from(value: StopDistanceTable) -> Self {
        value.records
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table() -> StopDistanceTable {
        StopDistanceTable::from_tokens(&["Airport:0:0", "Main Street:12:15", "Town Park:30:35"])
            .unwrap()
    }

    #[test]
    fn test_parse_record() {
        let record = StopDistance::from_str("Town Park:30:35").unwrap();
        assert_eq!(record.stop, "Town Park");
        assert_eq!(record.daytime, 30);
        assert_eq!(record.evening, 35);
        assert_eq!(record.to_string(), "Town Park:30:35");
    }

    #[test]
    fn test_parse_rejects_malformed_records() {
        assert!(StopDistance::from_str("Town Park:30").is_err());
        assert!(StopDistance::from_str(":1:2").is_err());
        assert!(StopDistance::from_str("Town Park:x:2").is_err());
    }

    #[test]
    fn test_distance_is_symmetric_per_profile() {
        let table = table();
        let d = DistanceProfile::Daytime;
        let e = DistanceProfile::Evening;
        assert_eq!(table.distance("Airport", "Town Park", d), Some(30));
        assert_eq!(table.distance("Town Park", "Airport", d), Some(30));
        assert_eq!(table.distance("Main Street", "Town Park", e), Some(20));
        assert_eq!(table.distance("Airport", "Nowhere", d), None);
    }

    #[test]
    fn test_offsets_beyond_a_day_rejected() {
        let result = StopDistanceTable::from_tokens(&["A:-2000000000:0", "B:2000000000:0"]);
        assert_eq!(
            result,
            Err(ModelError::InvalidStopDistance(String::from("A:-2000000000:0")))
        );
        let records = vec![
            StopDistance {
                stop: String::from("A"),
                daytime: i32::MIN,
                evening: 0,
            },
            StopDistance {
                stop: String::from("B"),
                daytime: i32::MAX,
                evening: 0,
            },
        ];
        assert!(StopDistanceTable::try_from(records).is_err());
    }

    #[test]
    fn test_distance_between_far_offsets_does_not_overflow() {
        let table = StopDistanceTable::from_tokens(&["A:-1440:0", "B:1440:0"]).unwrap();
        assert_eq!(table.distance("A", "B", DistanceProfile::Daytime), Some(2880));
        assert_eq!(table.distance("B", "A", DistanceProfile::Daytime), Some(2880));
    }

    #[test]
    fn test_duplicate_stops_rejected() {
        let result = StopDistanceTable::from_tokens(&["A:0:0", "A:3:3"]);
        assert_eq!(result, Err(ModelError::DuplicateStop(String::from("A"))));
    }

    #[test]
    fn test_serde_as_token_list() {
        let json = serde_json::to_string(&table()).unwrap();
        assert_eq!(json, r#"["Airport:0:0","Main Street:12:15","Town Park:30:35"]"#);
        let back: StopDistanceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table());
    }
}
