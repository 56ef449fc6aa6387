use crate::core::{Degrees, GeoPosition, Meters};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sextant reading as delivered by the sight-log parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub body: String,
    /// Local time of day, interpreted with the session's UTC offset
    pub time: NaiveTime,
    /// Sextant altitude, already converted to degrees
    pub altitude: Degrees,
}

/// Event produced by the sight-log parser, already tagged by kind.
///
/// Serialized as `{"kind": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Eye height above sea level
    Height(Meters),
    /// Sextant index error; positive when the instrument reads high
    Index(Degrees),
    Date(NaiveDate),
    /// UTC offset of reading times, signed minutes
    Zone(i32),
    DeadReckoning(GeoPosition),
    Reading(Reading),
}

/// The configuration directives a session accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Height,
    Index,
    Date,
    Zone,
    DeadReckoning,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveKind::Height => "height",
            DirectiveKind::Index => "index",
            DirectiveKind::Date => "date",
            DirectiveKind::Zone => "zone",
            DirectiveKind::DeadReckoning => "dead reckoning",
        };
        write!(f, "{}", name)
    }
}

/// Ordered event list, the document format read by the command line tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightLog {
    pub events: Vec<SessionEvent>,
}

impl SightLog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
