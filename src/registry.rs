use std::collections::HashSet;

use tracing::info;

use crate::bus::BusType;
use crate::config::{load_bus_config, load_sensor_config, BusConfig, SensorConfig, SensorEntry};
use crate::errors::{ConfigError, ConfigResult};

/// A sensor entry with its bus resolved to a device path
#[derive(Debug, Clone)]
pub struct StationEntry {
    pub sensor: SensorEntry,
    pub bus_path: String,
}

fn invalid(sensor: &str, field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field: format!("{}.{}", sensor, field), reason }
}

/// Check every sensor entry and pair it with its bus device path.
pub fn resolve(sensor_config: &SensorConfig, bus_config: &BusConfig) -> ConfigResult<Vec<StationEntry>> {
    let mut ids = HashSet::new();
    let mut used_buses = HashSet::new();
    let mut entries = Vec::with_capacity(sensor_config.sensors.len());

    for s in sensor_config.sensors.iter() {
        if !ids.insert(s.id.as_str()) {
            return Err(ConfigError::ValidationError(format!("duplicate sensor id '{}'", s.id)));
        }

        let bus = bus_config
            .find(&s.bus)
            .ok_or_else(|| ConfigError::BusNotFound { bus: s.bus.clone() })?;
        if BusType::from_str(&bus.r#type) != Some(BusType::I2C) {
            return Err(invalid(&s.id, "bus", format!("bus '{}' has type '{}', expected i2c", bus.id, bus.r#type)));
        }
        // The BMP085 answers on a single fixed address.
        if !used_buses.insert(bus.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "more than one sensor configured on bus '{}'",
                bus.id
            )));
        }

        if s.address > 0x7F {
            return Err(invalid(&s.id, "address", format!("{:#04x} is not a 7-bit address", s.address)));
        }
        if s.period().is_none() {
            return Err(invalid(&s.id, "frequency", "must be at least 1 Hz".to_string()));
        }
        if let Some(p0) = s.baseline_pressure {
            if !(p0 > 0.0) {
                return Err(invalid(&s.id, "baseline_pressure", format!("{} is not a positive pressure", p0)));
            }
        }

        info!("[registry] sensor id={} bus={} ({}) address={:#04x} mode={}", s.id, bus.id, bus.path, s.address, s.mode);
        entries.push(StationEntry { sensor: s.clone(), bus_path: bus.path.clone() });
    }

    Ok(entries)
}

/// Load `buses.toml` and `sensors.toml` from `config_path` and resolve them.
pub fn load_station(config_path: &str) -> ConfigResult<Vec<StationEntry>> {
    let bus_cfg = load_bus_config(&format!("{}/buses.toml", config_path))?;
    let sensor_cfg = load_sensor_config(&format!("{}/sensors.toml", config_path))?;
    info!("[config] loaded {} bus(es), {} sensor(s)", bus_cfg.buses.len(), sensor_cfg.sensors.len());
    resolve(&sensor_cfg, &bus_cfg)
}
