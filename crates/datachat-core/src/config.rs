use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::render::{Palette, Theme};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "DATACHAT_BACKEND_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Chart colors as `#rrggbb` strings; the built-in palette when absent.
    pub palette: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            palette: None,
        }
    }

    /// Load from the user config directory, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_or_init(&Self::get_config_path()?)?;
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = url;
            }
        }
        Ok(config)
    }

    /// Load `path`, writing the defaults there first if it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::new();
        match config.save_to(path) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
            Err(e) => tracing::warn!(error = %e, "could not write default config"),
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn theme(&self) -> Theme {
        match &self.palette {
            Some(colors) => Theme::default().with_palette(Palette::from_hex(colors)),
            None => Theme::default(),
        }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("datachat").join("config.json"))
    }
}
