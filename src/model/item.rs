// File: ./src/model/item.rs
// Core data types flowing through the schedule pipeline
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One upstream schedule row, keyed however the league site felt like that day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RawRecord(HashMap<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Map<String, Value>> for RawRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// The two calendar years a fall/spring season straddles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonYears {
    fall: i32,
    spring: i32,
}

impl SeasonYears {
    /// Season starting in the fall of `fall_year`.
    pub fn starting(fall_year: i32) -> Self {
        Self {
            fall: fall_year,
            spring: fall_year + 1,
        }
    }

    /// Returns `None` unless `fall < spring`.
    pub fn new(fall: i32, spring: i32) -> Option<Self> {
        (fall < spring).then_some(Self { fall, spring })
    }

    pub fn fall(&self) -> i32 {
        self.fall
    }

    pub fn spring(&self) -> i32 {
        self.spring
    }
}

impl std::fmt::Display for SeasonYears {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.fall, self.spring)
    }
}

/// A schedule row after normalization. Scores stay text: "TBD" and blanks are legal.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGame {
    pub start: DateTime<Tz>,
    pub rink: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
}

/// Fields of one VEVENT, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}
