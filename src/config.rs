// File: ./src/config.rs
// Settings for one feed, read once at startup and passed around by reference
use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;
pub const DEFAULT_UID_DOMAIN: &str = "truenorthhockey.com";
pub const DEFAULT_LEAGUE_NAME: &str = "True North Hockey";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// The tracked team; event titles are written from its point of view.
    pub team_name: String,
    pub game_duration_hours: u32,
    pub output_file: PathBuf,
    #[serde(default)]
    pub team_page_url: Option<String>,
    #[serde(default)]
    pub schedule_url: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
    #[serde(default = "default_league_name")]
    pub league_name: String,
    #[serde(default)]
    pub calendar_name: Option<String>,
}

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_league_name() -> String {
    DEFAULT_LEAGUE_NAME.to_string()
}

impl Config {
    /// Config with defaults for everything but the three required settings.
    pub fn new(team_name: &str, game_duration_hours: u32, output_file: impl Into<PathBuf>) -> Self {
        Self {
            team_name: team_name.to_string(),
            game_duration_hours,
            output_file: output_file.into(),
            team_page_url: None,
            schedule_url: None,
            timezone: DEFAULT_TIMEZONE,
            uid_domain: default_uid_domain(),
            league_name: default_league_name(),
            calendar_name: None,
        }
    }

    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "rinkcal", "rinkcal")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads from the platform config directory.
    pub fn load() -> Result<Self> {
        let path = Self::get_path().context("No config directory on this platform")?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_name.trim().is_empty() {
            bail!("team_name must not be empty");
        }
        if self.game_duration_hours == 0 {
            bail!("game_duration_hours must be a positive number of hours");
        }
        if self.output_file.as_os_str().is_empty() {
            bail!("output_file must not be empty");
        }
        Ok(())
    }

    pub fn calendar_name(&self) -> String {
        self.calendar_name
            .clone()
            .unwrap_or_else(|| format!("{} Hockey Schedule", self.team_name))
    }
}
