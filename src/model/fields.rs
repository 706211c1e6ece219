// File: ./src/model/fields.rs
// Case and synonym tolerant lookups over raw schedule rows
use crate::model::item::RawRecord;
use serde_json::Value;

/// Canonical fields of a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Time,
    Rink,
    HomeTeam,
    AwayTeam,
    HomeScore,
    AwayScore,
}

impl Field {
    /// Accepted spellings, most preferred first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Date => &["gameDate", "GameDate", "date", "Date"],
            Field::Time => &["gameTime", "GameTime", "time", "Time"],
            Field::Rink => &[
                "rinkName", "RinkName", "rink", "Rink", "location", "Location", "facility",
                "Facility",
            ],
            Field::HomeTeam => &[
                "homeTeamName",
                "HomeTeamName",
                "homeTeam",
                "HomeTeam",
                "home",
                "Home",
            ],
            Field::AwayTeam => &[
                "awayTeamName",
                "AwayTeamName",
                "awayTeam",
                "AwayTeam",
                "away",
                "Away",
            ],
            Field::HomeScore => &["homeScore", "HomeScore", "homeGoals", "HomeGoals", "hg", "HG"],
            Field::AwayScore => &["awayScore", "AwayScore", "awayGoals", "AwayGoals", "ag", "AG"],
        }
    }

    /// Key used when building records ourselves (e.g. from an HTML table).
    pub const fn key(self) -> &'static str {
        self.aliases()[0]
    }
}

/// Returns the first value found under any of `keys`, trying each key as
/// written, lowercased and uppercased. Nulls count as missing.
pub fn extract(record: &RawRecord, keys: &[&str], default: &str) -> String {
    for key in keys {
        for candidate in [key.to_string(), key.to_lowercase(), key.to_uppercase()] {
            if let Some(text) = record.get(&candidate).and_then(value_text) {
                return text.trim().to_string();
            }
        }
    }
    default.to_string()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RawRecord {
    /// Canonical field value, or an empty string.
    pub fn field(&self, field: Field) -> String {
        extract(self, field.aliases(), "")
    }
}
