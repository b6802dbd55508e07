use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::widget::Welcome;

pub const DEFAULT_ENDPOINT: &str = "https://portfolio-chatbot-api-bay.vercel.app/api/chat";
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub chat: ChatConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: String,
    /// Delay between opening the widget and focusing its input.
    pub settle_delay_ms: u64,
    /// No timeout when absent; a request then stays pending until the server answers.
    pub request_timeout_secs: Option<u64>,
    pub welcome: WelcomeConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            request_timeout_secs: None,
            welcome: WelcomeConfig::default(),
        }
    }
}

impl ChatConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WelcomeConfig {
    pub title: String,
    pub body: String,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            title: "👋 Welcome!".to_string(),
            body: "I'm here to help. Feel free to ask me anything about my portfolio, skills, or experience."
                .to_string(),
        }
    }
}

impl From<&WelcomeConfig> for Welcome {
    fn from(cfg: &WelcomeConfig) -> Self {
        Welcome {
            title: cfg.title.clone(),
            body: cfg.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub tagline: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            tagline: "Ask the assistant about projects, skills, or experience.".to_string(),
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".folio-chat")
}

pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn log_path() -> PathBuf {
    data_dir().join("folio-chat.log")
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config_from(&config_path()),
    }
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
