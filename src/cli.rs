// File: ./src/cli.rs
// Command-line entry: load config, fetch, publish
use crate::client::{FetchedSchedule, ScheduleClient};
use crate::config::Config;
use crate::model::SeasonYears;
use crate::pipeline::{self, PipelineError, PublishSummary};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rinkcal", version, about = "Hockey team schedule to iCalendar feed")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the feed here instead of the configured output_file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read schedule records from a saved JSON payload instead of the network
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Read the team page from a saved HTML file instead of the network
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn is_offline(&self) -> bool {
        self.records.is_some() || self.page.is_some()
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(out) = &self.output {
            config.output_file = out.clone();
        }
        Ok(config)
    }

    fn load_offline(&self) -> Result<FetchedSchedule> {
        let read = |path: &PathBuf| {
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))
        };
        let html = self.page.as_ref().map(read).transpose()?.unwrap_or_default();
        let payload = self.records.as_ref().map(read).transpose()?;
        Ok(FetchedSchedule::from_sources(&html, payload.as_deref()))
    }
}

pub async fn run(cli: &Cli) -> Result<PublishSummary> {
    let config = cli.load_config()?;

    tracing::info!("=== {} Schedule Scraper ===", config.team_name);
    let fetched = if cli.is_offline() {
        cli.load_offline()?
    } else {
        ScheduleClient::new().fetch(&config).await?
    };

    if fetched.records.is_empty() {
        tracing::error!("No game data retrieved. Check the scraper output above.");
    }

    let season = SeasonYears::resolve_now(&fetched.page_text);
    pipeline::publish(&fetched.records, season, &config)
}

/// Exit status for a finished run: 0, the pipeline's own code, or 1.
pub fn exit_status(result: &Result<PublishSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => match e.downcast_ref::<PipelineError>() {
            Some(fatal) => fatal.exit_code(),
            None => 1,
        },
    }
}
