// File: ./src/model/season.rs
// Works out which two calendar years the current season spans
use crate::model::item::SeasonYears;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// First month of the fall half of a season.
pub const FALL_START_MONTH: u32 = 9;

// Season labels look like "Winter 25/26".
static SEASON_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{2})/([0-9]{2})\b").expect("valid season regex"));

/// Sep–Dec belong to the fall year, Jan–Aug to the spring year.
pub fn infer_year(month: u32, fall_year: i32, spring_year: i32) -> i32 {
    if month >= FALL_START_MONTH {
        fall_year
    } else {
        spring_year
    }
}

impl SeasonYears {
    pub fn year_for_month(&self, month: u32) -> i32 {
        infer_year(month, self.fall(), self.spring())
    }

    /// Reads the season from a "YY/YY" label in `text`, or falls back to `today`.
    pub fn resolve(text: &str, today: NaiveDate) -> Self {
        if let Some(season) = Self::from_label(text) {
            return season;
        }
        let season = Self::from_date(today);
        tracing::info!("Season label not found in page; falling back to {}", season);
        season
    }

    /// Same as [`SeasonYears::resolve`], using the local date.
    pub fn resolve_now(text: &str) -> Self {
        Self::resolve(text, Local::now().date_naive())
    }

    pub fn from_label(text: &str) -> Option<Self> {
        let caps = SEASON_LABEL.captures(text)?;
        let fall = 2000 + caps[1].parse::<i32>().ok()?;
        let spring = 2000 + caps[2].parse::<i32>().ok()?;
        tracing::info!("Detected season: {} -> {}/{}", &caps[0], fall, spring);
        Some(Self::from_label_years(fall, spring))
    }

    // The label is trusted even when it is not a consecutive pair.
    fn from_label_years(fall: i32, spring: i32) -> Self {
        Self::new(fall, spring).unwrap_or_else(|| {
            tracing::warn!(
                "Season label {}/{} is not increasing; assuming a season starting {}",
                fall,
                spring,
                fall
            );
            Self::starting(fall)
        })
    }

    pub fn from_date(today: NaiveDate) -> Self {
        if today.month() >= FALL_START_MONTH {
            Self::starting(today.year())
        } else {
            Self::starting(today.year() - 1)
        }
    }
}
