// File: ./src/model/adapter.rs
// Turns games into calendar events and handles ICS serialization
use crate::config::Config;
use crate::model::item::{CalendarEvent, StructuredGame};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike, Property,
};

impl StructuredGame {
    /// Title oriented around `team`, whichever side it was listed on.
    pub fn title(&self, team: &str) -> String {
        let home = if self.home_team.is_empty() { "Home" } else { self.home_team.as_str() };
        let away = if self.away_team.is_empty() { "Away" } else { self.away_team.as_str() };

        let mut title = if away.trim().to_lowercase() == team.trim().to_lowercase() {
            format!("{} @ {}", team, home)
        } else {
            format!("{} vs {}", team, away)
        };

        if !self.rink.is_empty() {
            title.push_str(&format!(" | {}", self.rink));
        }
        title
    }

    pub fn description(&self) -> String {
        let or_tbd = |s: &str| if s.is_empty() { "TBD".to_string() } else { s.to_string() };

        let mut lines = vec![
            format!("Home: {}", or_tbd(&self.home_team)),
            format!("Away: {}", or_tbd(&self.away_team)),
        ];
        if self.has_final_score() {
            lines.push(format!(
                "Final: {} {} – {} {}",
                self.home_team, self.home_score, self.away_score, self.away_team
            ));
        }
        if !self.rink.is_empty() {
            lines.push(format!("Rink: {}", self.rink));
        }
        lines.join("\n")
    }

    /// Stable UID: the same game always yields the same identifier, so
    /// re-publishing the feed never duplicates entries in subscribers.
    pub fn uid(&self, domain: &str) -> String {
        let base = format!(
            "{}-{}-{}",
            self.start.format("%Y%m%dT%H%M%S"),
            self.home_team,
            self.away_team
        )
        .replace(' ', "_");
        format!("{}@{}", base, domain)
    }

    pub fn to_event(&self, config: &Config) -> CalendarEvent {
        CalendarEvent {
            uid: self.uid(&config.uid_domain),
            title: self.title(&config.team_name),
            description: self.description(),
            location: if self.rink.is_empty() {
                "TBD".to_string()
            } else {
                self.rink.clone()
            },
            start: self.start,
            end: self.start + chrono::Duration::hours(config.game_duration_hours.into()),
        }
    }
}

fn zoned(dt: &DateTime<Tz>) -> DatePerhapsTime {
    DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
        date_time: dt.naive_local(),
        tzid: dt.timezone().name().to_string(),
    })
}

impl CalendarEvent {
    pub fn to_vevent(&self, stamp: DateTime<Utc>) -> Event {
        let mut event = Event::new();
        event.uid(&self.uid);
        event.summary(&self.title);
        event.starts(zoned(&self.start));
        event.ends(zoned(&self.end));
        event.location(&self.location);
        event.description(&self.description);
        event.timestamp(stamp);
        event.done()
    }
}

/// Builds the whole feed. `stamp` becomes every event's DTSTAMP.
pub fn to_ics(events: &[CalendarEvent], config: &Config, stamp: DateTime<Utc>) -> String {
    let team = &config.team_name;
    let prodid = format!("-//{} Hockey//{}//EN", team, config.uid_domain);

    let mut calendar = Calendar::empty();
    calendar.append_property(Property::new("PRODID", &prodid));
    calendar.append_property(Property::new("VERSION", "2.0"));
    calendar.append_property(Property::new("CALSCALE", "GREGORIAN"));
    calendar.append_property(Property::new("METHOD", "PUBLISH"));
    calendar.append_property(Property::new("X-WR-CALNAME", &config.calendar_name()));
    calendar.append_property(Property::new("X-WR-TIMEZONE", config.timezone.name()));
    let caldesc = format!("Game schedule for the {} – {}.", team, config.league_name);
    calendar.append_property(Property::new("X-WR-CALDESC", &caldesc));

    for event in events {
        calendar.push(event.to_vevent(stamp));
    }

    calendar.to_string()
}
