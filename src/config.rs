/// Application settings
///
/// Defaults, then an optional JSON file in the user's config directory:
/// - Linux: ~/.config/catalog-browser/settings.json
/// - macOS: ~/Library/Application Support/catalog-browser/settings.json
/// - Windows: %APPDATA%\catalog-browser\settings.json
///
/// then the `CATALOG_API_URL` / `CATALOG_MEDIA_ORIGIN` environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::state::carousel::DEFAULT_INTERVAL;
use crate::state::paging::DEFAULT_WINDOW_THRESHOLD;
use crate::state::panel::DEFAULT_DEBOUNCE;

/// Shortest carousel interval; a zero interval would reschedule ticks back to back
const MIN_CAROUSEL_INTERVAL_MS: u64 = 500;
const MIN_DEBOUNCE_MS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the remote content API
    pub api_url: String,
    /// Prefix for relative media URLs
    pub media_origin: String,
    /// Items per list page
    pub page_size: usize,
    /// Page counts at or below this show every page number
    pub window_threshold: usize,
    /// Filter panel quiescence window
    pub debounce_ms: u64,
    /// Carousel auto-advance interval
    pub carousel_interval_ms: u64,
    /// Placeholder cards shown while a list is loading
    pub skeleton_cards: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:1337/api".to_owned(),
            media_origin: "http://localhost:1337".to_owned(),
            page_size: 10,
            window_threshold: DEFAULT_WINDOW_THRESHOLD,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            carousel_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            skeleton_cards: 10,
        }
    }
}

impl Settings {
    /// Load settings, logging and skipping any layer that fails
    pub fn load() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring settings file: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());
        settings.normalized()
    }

    /// Get the path where the settings file is looked up
    pub fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("catalog-browser");
        path.push("settings.json");
        Some(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Parse from a JSON string; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("CATALOG_API_URL") {
            self.api_url = url;
        }
        if let Some(origin) = var("CATALOG_MEDIA_ORIGIN") {
            self.media_origin = origin;
        }
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.window_threshold = self.window_threshold.max(1);
        self.debounce_ms = self.debounce_ms.max(MIN_DEBOUNCE_MS);
        self.carousel_interval_ms = self.carousel_interval_ms.max(MIN_CAROUSEL_INTERVAL_MS);
        self.api_url = self.api_url.trim_end_matches('/').to_owned();
        self.media_origin = self.media_origin.trim_end_matches('/').to_owned();
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }
}
