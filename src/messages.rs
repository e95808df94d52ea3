use serde::{Deserialize, Serialize};

use crate::sensors::SensorDataFrame;

/// Header metadata common to all published readings
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Station identifier
    pub device_id: String,
    /// Sensor identifier from `sensors.toml` (e.g. "baro0")
    pub sensor_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    /// Message schema version for evolution
    pub schema_v: u16,
}

impl Header {
    /// Create a new header stamped with the current time
    pub fn new(device_id: String, sensor_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let now_utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            device_id,
            sensor_id,
            seq,
            t_utc_ns: now_utc,
            schema_v: 1,
        }
    }
}

/// Barometer reading
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BarometerMessage {
    pub h: Header,
    /// Atmospheric pressure (Pa)
    pub pressure: i32,
    /// Temperature (°C)
    pub temperature: f32,
    /// Altitude relative to the configured baseline (m)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub altitude: Option<i32>,
    /// Raw ADC counts (UT, UP)
    pub raw_temperature: u16,
    pub raw_pressure: i32,
}

impl BarometerMessage {
    pub fn from_frame(device_id: &str, frame: &SensorDataFrame) -> Self {
        Self {
            h: Header::new(device_id.to_string(), frame.sensor_id.clone(), frame.seq),
            pressure: frame.measurement.pressure,
            temperature: frame.temperature_celsius(),
            altitude: frame.altitude,
            raw_temperature: frame.measurement.ut,
            raw_pressure: frame.measurement.up,
        }
    }

    /// Serialize to JSON for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::Measurement;

    fn frame(altitude: Option<i32>) -> SensorDataFrame {
        SensorDataFrame {
            sensor_id: "baro0".to_string(),
            seq: 7,
            measurement: Measurement {
                raw_temperature: [0x6C, 0xFA],
                raw_pressure: [0x5D, 0x23, 0x00],
                ut: 27898,
                up: 23843,
                temperature: 150,
                pressure: 69964,
            },
            altitude,
        }
    }

    #[test]
    fn test_header_creation() {
        let header = Header::new("station".to_string(), "baro0".to_string(), 42);

        assert_eq!(header.device_id, "station");
        assert_eq!(header.sensor_id, "baro0");
        assert_eq!(header.seq, 42);
        assert_eq!(header.schema_v, 1);
        assert!(header.t_utc_ns > 0);
    }

    #[test]
    fn test_barometer_message_serialization() {
        let msg = BarometerMessage::from_frame("station", &frame(Some(35)));

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"sensor_id\":\"baro0\""));
        assert!(json.contains("\"pressure\":69964"));
        assert!(json.contains("\"altitude\":35"));

        let decoded: BarometerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.h.seq, 7);
        assert_eq!(decoded.raw_temperature, 27898);
        assert!((decoded.temperature - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_altitude_omitted_without_baseline() {
        let json = BarometerMessage::from_frame("station", &frame(None)).to_json().unwrap();
        assert!(!json.contains("altitude"));
    }
}
