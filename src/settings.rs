//! Driver configuration
//!
//! Persisted separately from high scores in the platform config directory.
//! These knobs configure the host loop (viewport, pacing, demo runs), not
//! the simulation: gameplay constants live in [`crate::consts`] and scale
//! with the viewport.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host/driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width reported to the driver
    pub viewport_w: f32,
    /// Viewport height reported to the driver
    pub viewport_h: f32,
    /// Refresh rate in ticks per second; 0 runs unpaced
    pub tick_hz: u32,
    /// Unattended demo runs to play per invocation
    pub demo_runs: u32,
    /// Safety cap on ticks per run before the demo gives up
    pub max_run_ticks: u64,
    /// Fixed RNG seed for reproducible runs; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_w: 400.0,
            viewport_h: 600.0,
            tick_hz: 60,
            demo_runs: 3,
            max_run_ticks: 18_000,
            seed: None,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    fn storage_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "flapcraft")
            .map(|dirs| dirs.config_dir().join(Self::FILE_NAME))
    }

    /// Load settings from disk; missing or corrupt files fall back to
    /// defaults
    pub fn load() -> Self {
        if let Some(path) = Self::storage_path() {
            if let Ok(json) = fs::read_to_string(&path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings file: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::storage_path() else {
            log::warn!("No config directory available, settings not saved");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to write settings: {e}"),
            },
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
