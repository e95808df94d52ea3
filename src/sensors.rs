pub mod bmp085;

pub use self::bmp085::{Bmp085, Calibration, Measurement, Oversampling};

/// ISA sea-level pressure (Pa)
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0;

/// Height in metres of the point reading `current` above the point reading
/// `baseline`, using the international barometric formula.
///
/// # Panics
///
/// Both pressures must be positive.
pub fn altitude(current: f64, baseline: f64) -> i32 {
    assert!(
        current > 0.0 && baseline > 0.0,
        "altitude needs positive pressures (current={}, baseline={})",
        current,
        baseline
    );
    (44330.0 * (1.0 - (current / baseline).powf(1.0 / 5.255))).round() as i32
}

/// One reading handed from a sampling worker to the publisher
#[derive(Debug, Clone, PartialEq)]
pub struct SensorDataFrame {
    pub sensor_id: String,
    pub seq: u64,
    pub measurement: Measurement,
    /// Relative altitude (m) when a baseline pressure is configured
    pub altitude: Option<i32>,
}

impl SensorDataFrame {
    pub fn temperature_celsius(&self) -> f32 {
        self.measurement.temperature_celsius()
    }

    pub fn pressure_hpa(&self) -> f32 {
        self.measurement.pressure as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_small_pressure_drop() {
        let h = altitude(100900.0, 101325.0);
        let closed_form = 44330.0 * (1.0 - (100900.0f64 / 101325.0).powf(1.0 / 5.255));
        assert!(h > 0);
        assert!((h as f64 - closed_form).abs() <= 1.0);
        assert_eq!(h, 35);
    }

    #[test]
    fn test_altitude_sign_and_zero() {
        assert_eq!(altitude(95000.0, 95000.0), 0);
        assert!(altitude(102000.0, SEA_LEVEL_PRESSURE) < 0);
    }

    #[test]
    #[should_panic(expected = "positive pressures")]
    fn test_altitude_rejects_non_positive() {
        altitude(0.0, SEA_LEVEL_PRESSURE);
    }

    #[test]
    fn test_frame_unit_helpers() {
        let frame = SensorDataFrame {
            sensor_id: "baro0".to_string(),
            seq: 1,
            measurement: Measurement {
                raw_temperature: [0x6C, 0xFA],
                raw_pressure: [0x5D, 0x23, 0x00],
                ut: 27898,
                up: 23843,
                temperature: 150,
                pressure: 69964,
            },
            altitude: None,
        };
        assert!((frame.pressure_hpa() - 699.64).abs() < 1e-3);
        assert!((frame.temperature_celsius() - 15.0).abs() < 1e-4);
    }
}
