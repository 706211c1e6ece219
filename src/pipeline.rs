// File: ./src/pipeline.rs
// Drives raw records through normalization, ordering and serialization
use crate::config::Config;
use crate::model::adapter::to_ics;
use crate::model::{CalendarEvent, RawRecord, SeasonYears, StructuredGame};
use crate::storage::FeedWriter;
use chrono::Utc;
use chrono_tz::Tz;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that end a run without writing anything.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No game data retrieved")]
    NoRecords,
    #[error("Parsing produced no valid games ({discarded} records discarded)")]
    NoValidGames { discarded: usize },
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::NoRecords => 2,
            PipelineError::NoValidGames { .. } => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    /// Ordered by start; games sharing a start keep their input order.
    pub games: Vec<StructuredGame>,
    pub discarded: usize,
}

impl Schedule {
    pub fn normalize(
        records: &[RawRecord],
        season: SeasonYears,
        tz: Tz,
    ) -> Result<Self, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::NoRecords);
        }

        tracing::info!("Parsing {} raw records", records.len());
        let mut games: Vec<StructuredGame> = records
            .iter()
            .filter_map(|raw| StructuredGame::from_raw(raw, season, tz))
            .collect();
        let discarded = records.len() - games.len();

        tracing::info!("{} games successfully parsed", games.len());
        if discarded > 0 {
            tracing::warn!("{} records discarded", discarded);
        }
        if games.is_empty() {
            return Err(PipelineError::NoValidGames { discarded });
        }

        // sort_by_key is stable
        games.sort_by_key(|g| g.start);
        Ok(Self { games, discarded })
    }

    pub fn events(&self, config: &Config) -> Vec<CalendarEvent> {
        self.games.iter().map(|g| g.to_event(config)).collect()
    }
}

/// Normalizes and materializes in one go.
pub fn build_events(
    records: &[RawRecord],
    season: SeasonYears,
    config: &Config,
) -> Result<Vec<CalendarEvent>, PipelineError> {
    Ok(Schedule::normalize(records, season, config.timezone)?.events(config))
}

#[derive(Debug, Clone)]
pub struct PublishSummary {
    pub path: PathBuf,
    pub events: usize,
    pub discarded: usize,
    pub bytes: usize,
}

/// Full run: normalize, order, serialize, write. Nothing is written when
/// the run fails.
pub fn publish(
    records: &[RawRecord],
    season: SeasonYears,
    config: &Config,
) -> anyhow::Result<PublishSummary> {
    let schedule = Schedule::normalize(records, season, config.timezone)?;
    let events = schedule.events(config);

    let path = config.output_file.clone();
    tracing::info!("Writing {} events to {}", events.len(), path.display());
    let ics = to_ics(&events, config, Utc::now());
    FeedWriter::atomic_write(&path, &ics)?;
    tracing::info!("Done - {} bytes written", ics.len());

    if let (Some(first), Some(last)) = (events.first(), events.last()) {
        tracing::info!("First game : {}  {}", first.start, first.title);
        tracing::info!("Last game  : {}  {}", last.start, last.title);
    }

    Ok(PublishSummary {
        path,
        events: events.len(),
        discarded: schedule.discarded,
        bytes: ics.len(),
    })
}
