use std::fs;
use std::path::Path;

use geonote_domain::DEFAULT_MAP_ZOOM;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache_dir: String,
    pub thumbnail_size: u32,
    pub marker_thumbnail_size: u32,
    pub map_zoom: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: "cache".to_string(),
            thumbnail_size: 256,
            marker_thumbnail_size: 100,
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl AppConfig {
    /// Defaults when `path` is `None`; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|error| format!("cannot read config {}: {error}", path.display()))?;
        let config = Self::from_toml(&text)
            .map_err(|error| format!("invalid config {}: {error}", path.display()))?;
        config
            .validate()
            .map_err(|error| format!("invalid config {}: {error}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.thumbnail_size == 0 {
            return Err("thumbnail_size must be positive".to_string());
        }
        if self.marker_thumbnail_size == 0 {
            return Err("marker_thumbnail_size must be positive".to_string());
        }
        if self.cache_dir.trim().is_empty() {
            return Err("cache_dir must not be empty".to_string());
        }
        Ok(())
    }
}
