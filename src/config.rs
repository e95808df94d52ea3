pub mod bus_config;
pub mod sensor_config;

pub use bus_config::{load_bus_config, BusConfig, BusEntry};
pub use sensor_config::{load_sensor_config, SensorConfig, SensorEntry};

use crate::errors::{ConfigError, ConfigResult};

/// Directory holding `buses.toml` and `sensors.toml` (`CONFIG_PATH`, default `config`)
pub fn config_dir() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string())
}

pub(crate) fn read_config_file(path: &str) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })
}
