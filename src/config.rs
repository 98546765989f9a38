// src/config.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "ecg-viewer.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub samples: usize,
    pub sample_rate_hz: f32,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            sample_rate_hz: 360.0,
            seed: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Samples shown in the main view.
    pub window_size: usize,
    pub main_height: f32,
    pub minimap_height: f32,
    pub show_minimap_peaks: bool,
    /// Arrow-key scroll step as a fraction of the window.
    pub pan_fraction: f32,
    pub demo: DemoConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: 3000,
            main_height: 300.0,
            minimap_height: 60.0,
            show_minimap_peaks: true,
            pan_fraction: 0.1,
            demo: DemoConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid viewer configuration")
    }

    /// Load from `explicit` if given, else from `ecg-viewer.json` in the working
    /// directory when it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => {
                info!("no configuration file, using defaults");
                return Ok(Self::default());
            }
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        info!("configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn pan_step(&self) -> i64 {
        ((self.window_size as f32 * self.pan_fraction).round() as i64).max(1)
    }
}
