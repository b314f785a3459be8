use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::nav::keyboard::FocusOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Api,
    Mock,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_data_source")]
    pub data_source: DataSource,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_wrap_navigation")]
    pub wrap_navigation: bool,
    #[serde(default = "default_skip_disabled")]
    pub skip_disabled: bool,
    #[serde(default = "default_announce_changes")]
    pub announce_changes: bool,
    #[serde(default = "default_navigation_delay_ms")]
    pub navigation_delay_ms: u64,
    #[serde(default = "default_announcement_ms")]
    pub announcement_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_data_source() -> DataSource {
    DataSource::Api
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_mock_latency_ms() -> u64 {
    300
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_wrap_navigation() -> bool {
    true
}
fn default_skip_disabled() -> bool {
    false
}
fn default_announce_changes() -> bool {
    true
}
fn default_navigation_delay_ms() -> u64 {
    150
}
fn default_announcement_ms() -> u64 {
    1000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("portview")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            data_source: default_data_source(),
            request_timeout_secs: default_request_timeout_secs(),
            mock_latency_ms: default_mock_latency_ms(),
            theme: default_theme(),
            wrap_navigation: default_wrap_navigation(),
            skip_disabled: default_skip_disabled(),
            announce_changes: default_announce_changes(),
            navigation_delay_ms: default_navigation_delay_ms(),
            announcement_ms: default_announcement_ms(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Loads `path`, or the default location when `None`. A missing file is
    /// not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portview")
            .join("config.toml")
    }

    pub fn focus_options(&self) -> FocusOptions {
        FocusOptions {
            wrap: self.wrap_navigation,
            skip_disabled: self.skip_disabled,
            announce_changes: self.announce_changes,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }

    pub fn announcement_lifetime(&self) -> Duration {
        Duration::from_millis(self.announcement_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
