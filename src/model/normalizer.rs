// File: ./src/model/normalizer.rs
// Turns one raw schedule row into a StructuredGame
use crate::model::fields::Field;
use crate::model::item::{RawRecord, SeasonYears, StructuredGame};
use crate::model::parser::parse_datetime;
use chrono_tz::Tz;

impl StructuredGame {
    /// Normalizes `raw`, or returns `None` (with a warning) when it has no
    /// usable date. Never panics on malformed input.
    pub fn from_raw(raw: &RawRecord, season: SeasonYears, tz: Tz) -> Option<Self> {
        let date = raw.field(Field::Date);
        let time = raw.field(Field::Time);

        if date.is_empty() {
            tracing::warn!("Skipping record with no date: {:?}", raw);
            return None;
        }

        let Some(start) = parse_datetime(&date, &time, season, tz) else {
            tracing::warn!("Could not parse date: '{}' (time: '{}')", date, time);
            return None;
        };

        Some(StructuredGame {
            start,
            rink: raw.field(Field::Rink),
            home_team: raw.field(Field::HomeTeam),
            away_team: raw.field(Field::AwayTeam),
            home_score: raw.field(Field::HomeScore),
            away_score: raw.field(Field::AwayScore),
        })
    }

    pub fn has_final_score(&self) -> bool {
        !self.home_score.is_empty() && !self.away_score.is_empty()
    }
}
