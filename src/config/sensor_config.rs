use std::time::Duration;

use serde::Deserialize;

use super::read_config_file;
use crate::errors::ConfigResult;
use crate::sensors::bmp085::registers::DEFAULT_ADDRESS;
use crate::sensors::Oversampling;

/// Root configuration struct expecting `[[sensor]]` TOML array format
#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    #[serde(rename = "sensor")]
    pub sensors: Vec<SensorEntry>,
}

/// One sensor entry, matching each `[[sensor]]` section
#[derive(Debug, Clone, Deserialize)]
pub struct SensorEntry {
    pub id: String,
    pub bus: String,
    #[serde(default = "default_address")]
    pub address: u8,
    /// Oversampling ordinal, 0..=3; anything else fails to parse
    #[serde(default)]
    pub mode: Oversampling,
    /// Sampling rate in Hz
    pub frequency: Option<u32>,
    /// Number of readings to take; run until interrupted when absent
    pub samples: Option<u64>,
    #[serde(default)]
    pub print_calibration: bool,
    /// Reference pressure (Pa) for relative altitude
    pub baseline_pressure: Option<f64>,
}

fn default_address() -> u8 {
    DEFAULT_ADDRESS
}

impl SensorEntry {
    pub fn frequency(&self) -> u32 {
        self.frequency.unwrap_or(1)
    }

    /// Time between readings, `None` for a zero frequency.
    pub fn period(&self) -> Option<Duration> {
        Duration::from_secs(1).checked_div(self.frequency())
    }
}

impl SensorConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Loads config from TOML file
pub fn load_sensor_config(path: &str) -> ConfigResult<SensorConfig> {
    SensorConfig::parse(&read_config_file(path)?)
}
