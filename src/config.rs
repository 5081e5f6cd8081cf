//! Harness Configuration
//!
//! Handles loading run settings from an optional YAML file. Command
//! line flags override file values; missing fields fall back to
//! defaults.
//!
//! # Example YAML Format
//!
//! ```yaml
//! duration_secs: 30
//! units_per_sec: 50
//! sample_interval_secs: 1
//! ```

use std::error::Error;
use std::fs;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

/// Default run length in seconds.
const DEFAULT_DURATION_SECS: u64 = 10;

/// Default work units per second.
const DEFAULT_UNITS_PER_SEC: u64 = 10;

/// Default seconds between progress samples.
const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 1;

/// Settings for one stress run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// How long the synthetic load runs, in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    /// Work units completed (and counted) per second.
    #[serde(default = "default_units_per_sec")]
    pub units_per_sec: u64,

    /// Seconds between progress samples.
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,
}

fn default_duration_secs() -> u64 {
    DEFAULT_DURATION_SECS
}

fn default_units_per_sec() -> u64 {
    DEFAULT_UNITS_PER_SEC
}

fn default_sample_interval_secs() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_SECS
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            units_per_sec: DEFAULT_UNITS_PER_SEC,
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }
}

impl HarnessConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file '{}': {}", path, e))?;

        let config: HarnessConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Invalid config file '{}': {}", path, e))?;

        config.validate()?;

        info!(
            "Config loaded from {}: {}s at {} units/sec, sampling every {}s",
            path, config.duration_secs, config.units_per_sec, config.sample_interval_secs
        );

        Ok(config)
    }

    /// Checks that the settings describe a runnable stress run.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.units_per_sec == 0 {
            return Err("units_per_sec must be at least 1".into());
        }
        if self.sample_interval_secs == 0 {
            return Err("sample_interval_secs must be at least 1".into());
        }
        Ok(())
    }

    /// Run length as a duration.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Poll interval as a duration.
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }
}
