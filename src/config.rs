//! Application configuration module.
//!
//! Handles loading and validating `carta.toml`. Config files are sparse —
//! override just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! database_url = "sqlite:carta.db"   # SQLite database location
//! media_dir = "media"                # Root of stored image assets
//! menu_url = "http://localhost:8000/menu/"  # Public URL the QR code encodes
//!
//! [images]
//! max_edge = 400    # Longest allowed edge for stored photos (pixels)
//! quality = 85      # JPEG re-encode quality (0-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::DownsampleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `carta.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database location.
    pub database_url: String,
    /// Root directory for stored image assets.
    pub media_dir: String,
    /// Public URL of the customer menu — this is what the QR code encodes.
    pub menu_url: String,
    /// Image post-processing settings.
    pub images: ImagesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:carta.db".to_string(),
            media_dir: "media".to_string(),
            menu_url: "http://localhost:8000/menu/".to_string(),
            images: ImagesConfig::default(),
        }
    }
}

/// Image post-processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Longest allowed edge for stored photos, in pixels.
    pub max_edge: u32,
    /// JPEG re-encode quality (0 = worst, 100 = best).
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        let defaults = DownsampleConfig::default();
        Self {
            max_edge: defaults.max_edge,
            quality: defaults.quality,
        }
    }
}

impl AppConfig {
    /// Load from `path` if it exists, falling back to stock defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = if path.exists() {
            toml::from_str(&fs::read_to_string(path)?)?
        } else {
            AppConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database_url must not be empty".into(),
            ));
        }
        if self.menu_url.trim().is_empty() {
            return Err(ConfigError::Validation("menu_url must not be empty".into()));
        }
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.max_edge == 0 {
            return Err(ConfigError::Validation(
                "images.max_edge must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The post-processor limits this config describes.
    pub fn downsample_config(&self) -> DownsampleConfig {
        DownsampleConfig {
            max_edge: self.images.max_edge,
            quality: self.images.quality,
        }
    }
}

/// A documented stock `carta.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r##"# carta configuration
# All options are optional - defaults shown below

# SQLite database location
database_url = "sqlite:carta.db"

# Root directory for stored image assets
media_dir = "media"

# Public URL of the customer menu - this is what the QR code encodes
menu_url = "http://localhost:8000/menu/"

[images]
# Longest allowed edge for stored photos (pixels)
max_edge = 400
# JPEG re-encode quality (0-100)
quality = 85
"##
}
