//! Passenger events.
//!
//! Live feeds report passengers entering and leaving stations. Events carry
//! a timestamp for downstream consumers, but counting itself is order
//! independent: each event is a +1/-1 delta on the station's count.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{NetworkError, StationId};

/// The direction of a passenger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerEventKind {
    /// A passenger entered the station.
    In,
    /// A passenger left the station.
    Out,
}

impl FromStr for PassengerEventKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(PassengerEventKind::In),
            "out" => Ok(PassengerEventKind::Out),
            other => Err(NetworkError::BadEventKind(other.to_string())),
        }
    }
}

impl fmt::Display for PassengerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerEventKind::In => f.write_str("in"),
            PassengerEventKind::Out => f.write_str("out"),
        }
    }
}

impl Serialize for PassengerEventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PassengerEventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A single passenger event at a station.
///
/// Wire format:
/// `{"station_id": ..., "passenger_event": "in"|"out", "datetime": "...Z"}`.
/// The datetime is ISO-8601 with a trailing `Z`, which is stripped before
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerEvent {
    /// The station the event happened at.
    pub station_id: StationId,

    /// Whether the passenger entered or left.
    #[serde(rename = "passenger_event")]
    pub kind: PassengerEventKind,

    /// When the event happened. Carried for downstream use; does not affect
    /// counting.
    #[serde(
        deserialize_with = "datetime_from_zulu",
        serialize_with = "datetime_to_zulu"
    )]
    pub datetime: NaiveDateTime,
}

fn datetime_from_zulu<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let s = String::deserialize(deserializer)?;
    let trimmed = s.strip_suffix('Z').unwrap_or(&s);
    trimmed.parse().map_err(de::Error::custom)
}

fn datetime_to_zulu<S: Serializer>(
    datetime: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{}Z", datetime.format("%Y-%m-%dT%H:%M:%S")))
}
