//! Daemon configuration.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trackpost_core::{NormalizerConfig, SensorKind};

/// Device name used in topics, unique ids and discovery payloads.
pub const DEVICE_NAME: &str = "trackpost";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Distinguishes multiple bridges publishing to the same broker.
    pub device_id: u32,
    /// First topic segment.
    pub topic_prefix: String,
    /// Preferred player short name (e.g. "spotify").
    pub favorite_player: Option<String>,
    /// Normalization engine tuning.
    pub normalizer: NormalizerConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            device_id: 1,
            topic_prefix: DEVICE_NAME.to_string(),
            favorite_player: None,
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Load from `path`, falling back to defaults when the file is
    /// missing or invalid. Startup never fails on configuration.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Invalid config {}: {}. Using defaults", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Default location: `<config dir>/trackpost/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEVICE_NAME)
            .join("config.json")
    }

    /// State topic for one sensor: `<prefix>/<device_id>/<suffix>`.
    pub fn sensor_topic(&self, sensor: SensorKind) -> String {
        format!(
            "{}/{}/{}",
            self.topic_prefix,
            self.device_id,
            sensor.topic_suffix()
        )
    }
}
