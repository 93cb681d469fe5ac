use std::env;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::calendar::grid::CALENDAR_YEAR;
use crate::theme::ThemeConfig;

const APP_DIR: &str = "eco-calendar";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Everything read from `config.toml`, with the API key possibly filled in
/// from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub completion: CompletionSettings,
    pub calendar: CalendarSettings,
    pub theme: ThemeConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub model: String,
    pub endpoint: String,
    /// Sampling temperature for the monthly events call. The tip call uses the
    /// service default.
    pub events_temperature: f32,
    pub api_key: Option<String>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            events_temperature: 0.2,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Month shown and day selected at startup.
    pub anchor: NaiveDate,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            anchor: NaiveDate::from_ymd_opt(CALENDAR_YEAR, 1, 1).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    pub fn path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(env::temp_dir)
                .join(APP_DIR)
                .join("eco-calendar.log")
        })
    }
}

impl Config {
    /// Load `.env`, then the config file if present, then the API key from the
    /// environment. A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Some(key) = api_key_from(|var| env::var(var).ok()) {
            config.completion.api_key = Some(key);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).wrap_err_with(|| format!("invalid config in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// First non-blank value among the known API key variables.
fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
