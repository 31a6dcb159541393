use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_screen_name")]
    pub screen_name: String,

    pub bearer_token: Option<String>,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Items per request; the feed's own default when unset.
    pub page_size: Option<u32>,

    /// Replaces the built-in alias table when present.
    pub aliases: Option<BTreeMap<String, Vec<String>>>,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timeline-ingest");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("items.db").to_string_lossy().to_string()
}

fn default_api_base_url() -> String {
    "https://api.twitter.com/1.1/".to_string()
}

fn default_screen_name() -> String {
    "Southbayfession".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            api_base_url: default_api_base_url(),
            screen_name: default_screen_name(),
            bearer_token: None,
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
            page_size: None,
            aliases: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the loop spin or every fetch fail.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(AppError::Config("poll_interval_secs must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timeline-ingest")
            .join("config.toml")
    }

    /// Environment variables win over the config file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup("TIMELINE_DB_PATH") {
            self.db_path = path;
        }
        if let Some(url) = lookup("TIMELINE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(name) = lookup("TIMELINE_SCREEN_NAME") {
            self.screen_name = name;
        }
        if let Some(token) = lookup("TIMELINE_BEARER_TOKEN") {
            self.bearer_token = Some(token);
        }
        if let Some(secs) = lookup("TIMELINE_POLL_INTERVAL_SECS") {
            self.poll_interval_secs = secs.parse().map_err(|_| {
                AppError::Config(format!("TIMELINE_POLL_INTERVAL_SECS is not a number: {:?}", secs))
            })?;
        }
        Ok(())
    }
}
