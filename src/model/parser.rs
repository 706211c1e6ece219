// File: ./src/model/parser.rs
// Date/time parsing for schedule text. Each format table is tried in order
// and the first success wins.
use crate::model::item::SeasonYears;
use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

// Leap year, so "Feb 29" survives until the real season year is known.
const PLACEHOLDER_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: &'static str,
    /// The pattern carries no year; it is inferred from the season.
    pub yearless: bool,
}

pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat::yearless("%b %d"),
    DateFormat::yearless("%B %d"),
    DateFormat::dated("%m/%d/%Y"),
    DateFormat::dated("%Y-%m-%d"),
    DateFormat::dated("%d/%m/%Y"),
    DateFormat::dated("%m-%d-%Y"),
];

impl DateFormat {
    const fn yearless(pattern: &'static str) -> Self {
        Self {
            pattern,
            yearless: true,
        }
    }

    const fn dated(pattern: &'static str) -> Self {
        Self {
            pattern,
            yearless: false,
        }
    }

    pub fn parse(&self, input: &str, season: SeasonYears) -> Option<NaiveDate> {
        if !self.yearless {
            return NaiveDate::parse_from_str(input, self.pattern).ok();
        }
        let padded = format!("{} {}", input, PLACEHOLDER_YEAR);
        let pattern = format!("{} %Y", self.pattern);
        let d = NaiveDate::parse_from_str(&padded, &pattern).ok()?;
        NaiveDate::from_ymd_opt(season.year_for_month(d.month()), d.month(), d.day())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    pub pattern: &'static str,
    /// The pattern has no minutes; they default to zero.
    pub hour_only: bool,
}

pub const TIME_FORMATS: &[TimeFormat] = &[
    TimeFormat::new("%I:%M %p"),
    TimeFormat::new("%I:%M%p"),
    TimeFormat::new("%H:%M"),
    TimeFormat {
        pattern: "%I %p",
        hour_only: true,
    },
    TimeFormat::new("%I:%M:%S %p"),
];

impl TimeFormat {
    const fn new(pattern: &'static str) -> Self {
        Self {
            pattern,
            hour_only: false,
        }
    }

    pub fn parse(&self, input: &str) -> Option<NaiveTime> {
        let mut parsed = Parsed::new();
        parse(&mut parsed, input, StrftimeItems::new(self.pattern)).ok()?;
        if self.hour_only {
            parsed.set_minute(0).ok()?;
        }
        parsed.to_naive_time().ok()
    }
}

/// Parses a schedule date. Yearless dates get their year from `season`.
pub fn parse_date(input: &str, season: SeasonYears) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS.iter().find_map(|fmt| {
        let date = fmt.parse(input, season)?;
        tracing::trace!("Date '{}' matched {}", input, fmt.pattern);
        Some(date)
    })
}

/// Parses a clock time using standard 12-hour semantics (12 AM is midnight).
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim().to_uppercase();
    TIME_FORMATS.iter().find_map(|fmt| fmt.parse(&input))
}

/// Combines a date and an optional time into a zoned start.
///
/// Returns `None` only when the date is unparseable. A time that fails every
/// format is reported and replaced by midnight.
pub fn parse_datetime(
    date: &str,
    time: &str,
    season: SeasonYears,
    tz: Tz,
) -> Option<DateTime<Tz>> {
    let day = parse_date(date, season)?;
    let mut naive = day.and_time(NaiveTime::MIN);

    if !time.trim().is_empty() {
        match parse_time(time).and_then(|t| day.and_hms_opt(t.hour(), t.minute(), 0)) {
            Some(dt) => naive = dt,
            None => tracing::warn!("Could not parse time '{}'; using midnight.", time),
        }
    }

    Some(localize(naive, tz))
}

/// Attaches `tz` to a wall-clock time. Ambiguous times (DST fall-back) take
/// the earlier instant; times inside a spring-forward gap move past it.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    // Real-world gaps are at most an hour; probe a little further to be safe.
    for step in 0..=4 {
        let probe = naive + chrono::Duration::minutes(30 * step);
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            if step > 0 {
                tracing::debug!("{} does not exist in {}; using {}", naive, tz, dt);
            }
            return dt;
        }
    }
    tz.from_utc_datetime(&naive)
}
