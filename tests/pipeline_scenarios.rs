use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::Toronto;
use rinkcal::config::Config;
use rinkcal::model::adapter::to_ics;
use rinkcal::model::{RawRecord, SeasonYears, StructuredGame};
use rinkcal::pipeline::{PipelineError, Schedule, build_events, publish};
use serde_json::json;

fn record(pairs: &[(&str, &str)]) -> RawRecord {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn season() -> SeasonYears {
    SeasonYears::starting(2025)
}

fn config() -> Config {
    Config::new("Beavers", 2, "docs/hockey_schedule.ics")
}

#[test]
fn home_game_with_evening_time() {
    let raw = record(&[
        ("gameDate", "Sep 16"),
        ("gameTime", "7:30 PM"),
        ("homeTeamName", "Beavers"),
        ("awayTeamName", "Wolves"),
    ]);
    let game = StructuredGame::from_raw(&raw, season(), Toronto).expect("game parses");

    assert_eq!(
        game.start,
        Toronto.with_ymd_and_hms(2025, 9, 16, 19, 30, 0).unwrap()
    );
    assert_eq!(game.title("Beavers"), "Beavers vs Wolves");
}

#[test]
fn spring_away_game_without_time() {
    let raw = record(&[
        ("gameDate", "Feb 3"),
        ("homeTeamName", "Hawks"),
        ("awayTeamName", "Beavers"),
    ]);
    let game = StructuredGame::from_raw(&raw, season(), Toronto).expect("game parses");

    assert_eq!(
        game.start,
        Toronto.with_ymd_and_hms(2026, 2, 3, 0, 0, 0).unwrap()
    );
    assert_eq!(game.title("Beavers"), "Beavers @ Hawks");
}

#[test]
fn record_without_date_is_dropped() {
    let no_date = record(&[("homeTeamName", "Hawks"), ("awayTeamName", "Beavers")]);
    assert!(StructuredGame::from_raw(&no_date, season(), Toronto).is_none());

    let good = record(&[("date", "Oct 7"), ("home", "Beavers"), ("away", "Owls")]);
    let schedule = Schedule::normalize(&[no_date, good], season(), Toronto).unwrap();
    assert_eq!(schedule.games.len(), 1);
    assert_eq!(schedule.discarded, 1);
}

#[test]
fn unparseable_date_is_dropped_but_bad_time_is_kept() {
    let bad_date = record(&[("gameDate", "TBA"), ("gameTime", "7:00 PM")]);
    assert!(StructuredGame::from_raw(&bad_date, season(), Toronto).is_none());

    let bad_time = record(&[("gameDate", "Nov 2"), ("gameTime", "late")]);
    let game = StructuredGame::from_raw(&bad_time, season(), Toronto).unwrap();
    assert_eq!(game.start, Toronto.with_ymd_and_hms(2025, 11, 2, 0, 0, 0).unwrap());
}

#[test]
fn empty_input_is_fatal() {
    let err = build_events(&[], season(), &config()).unwrap_err();
    assert_eq!(err, PipelineError::NoRecords);
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn all_records_unusable_is_fatal() {
    let records = vec![record(&[("gameDate", "soon")]), record(&[("rink", "A")])];
    let err = build_events(&records, season(), &config()).unwrap_err();
    assert_eq!(err, PipelineError::NoValidGames { discarded: 2 });
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn events_come_out_in_start_order() {
    let records = vec![
        record(&[("gameDate", "Jan 10"), ("home", "A"), ("away", "Beavers")]),
        record(&[("gameDate", "Sep 20"), ("gameTime", "9:00 PM"), ("home", "Beavers"), ("away", "B")]),
        record(&[("gameDate", "Sep 20"), ("gameTime", "6:00 PM"), ("home", "Beavers"), ("away", "C")]),
        record(&[("gameDate", "Dec 31"), ("home", "Beavers"), ("away", "D")]),
    ];
    let events = build_events(&records, season(), &config()).unwrap();

    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Beavers vs C", "Beavers vs B", "Beavers vs D", "Beavers @ A"]
    );
    assert!(events.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn same_start_keeps_input_order() {
    let records = vec![
        record(&[("gameDate", "Oct 1"), ("home", "Beavers"), ("away", "First")]),
        record(&[("gameDate", "Oct 1"), ("home", "Beavers"), ("away", "Second")]),
    ];
    let events = build_events(&records, season(), &config()).unwrap();
    assert_eq!(events[0].title, "Beavers vs First");
    assert_eq!(events[1].title, "Beavers vs Second");
}

#[test]
fn identifiers_are_stable_across_runs() {
    let records = vec![
        record(&[("gameDate", "Sep 16"), ("gameTime", "7:30 PM"), ("homeTeamName", "Big Beavers"), ("awayTeamName", "Wolves")]),
        record(&[("gameDate", "Mar 1"), ("homeTeamName", "Hawks"), ("awayTeamName", "Big Beavers")]),
    ];
    let first = build_events(&records, season(), &config()).unwrap();
    let second = build_events(&records, season(), &config()).unwrap();

    let uids = |events: &[rinkcal::model::CalendarEvent]| {
        events.iter().map(|e| e.uid.clone()).collect::<Vec<_>>()
    };
    assert_eq!(uids(&first), uids(&second));
    assert_eq!(first[0].uid, "20250916T193000-Big_Beavers-Wolves@truenorthhockey.com");
}

#[test]
fn event_fields_with_final_score() {
    let raw: RawRecord = [
        ("GameDate", json!("Oct 14")),
        ("GameTime", json!("8:15pm")),
        ("RinkName", json!("Canlan 3")),
        ("HomeTeamName", json!("Wolves")),
        ("AwayTeamName", json!("beavers")),
        ("HG", json!(4)),
        ("AG", json!(2)),
    ]
    .into_iter()
    .collect();
    let event = StructuredGame::from_raw(&raw, season(), Toronto)
        .unwrap()
        .to_event(&config());

    assert_eq!(event.title, "Beavers @ Wolves | Canlan 3");
    assert_eq!(
        event.description,
        "Home: Wolves\nAway: beavers\nFinal: Wolves 4 – 2 beavers\nRink: Canlan 3"
    );
    assert_eq!(event.location, "Canlan 3");
    assert_eq!(event.end - event.start, chrono::Duration::hours(2));
}

#[test]
fn missing_teams_and_rink_render_placeholders() {
    let raw = record(&[("gameDate", "Apr 4"), ("homeScore", "3")]);
    let event = StructuredGame::from_raw(&raw, season(), Toronto)
        .unwrap()
        .to_event(&config());

    assert_eq!(event.title, "Beavers vs Away");
    assert_eq!(event.description, "Home: TBD\nAway: TBD");
    assert_eq!(event.location, "TBD");
}

#[test]
fn feed_has_zoned_events() {
    let records = vec![record(&[
        ("gameDate", "Sep 16"),
        ("gameTime", "7:30 PM"),
        ("homeTeamName", "Beavers"),
        ("awayTeamName", "Wolves"),
    ])];
    let events = build_events(&records, season(), &config()).unwrap();
    let stamp = chrono::Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let ics = to_ics(&events, &config(), stamp);

    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.contains("METHOD:PUBLISH"));
    assert!(ics.contains("X-WR-TIMEZONE:America/Toronto"));
    assert!(ics.contains("DTSTART;TZID=America/Toronto:20250916T193000"));
    assert!(ics.contains("DTEND;TZID=America/Toronto:20250916T213000"));
    assert!(ics.contains("UID:20250916T193000-Beavers-Wolves@truenorthhockey.com"));
    assert!(ics.contains("SUMMARY:Beavers vs Wolves"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
}

#[test]
fn failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("docs").join("feed.ics");
    let config = Config::new("Beavers", 2, &out);

    let err = publish(&[], season(), &config).unwrap_err();
    assert_eq!(err.downcast_ref::<PipelineError>(), Some(&PipelineError::NoRecords));
    assert!(!out.exists());
}

#[test]
fn successful_run_writes_the_feed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("docs").join("feed.ics");
    let config = Config::new("Beavers", 2, &out);
    let records = vec![
        record(&[("gameDate", "Feb 3"), ("homeTeamName", "Hawks"), ("awayTeamName", "Beavers")]),
        record(&[("gameDate", "n/a")]),
    ];

    let summary = publish(&records, season(), &config).unwrap();
    assert_eq!(summary.events, 1);
    assert_eq!(summary.discarded, 1);

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.len(), summary.bytes);
    assert!(written.contains("DTSTART;TZID=America/Toronto:20260203T000000"));
    assert!(!dir.path().join("docs").join("feed.tmp").exists());
}

#[test]
fn season_label_drives_yearless_dates() {
    let season = SeasonYears::resolve("Beavers | Winter 24/25", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
    let raw = record(&[("gameDate", "Jan 5")]);
    let game = StructuredGame::from_raw(&raw, season, Toronto).unwrap();
    assert_eq!(game.start, Toronto.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap());
}
