//! BMP085 register map and command bytes.

/// Default 7-bit bus address of the BMP085.
pub const DEFAULT_ADDRESS: u8 = 0x77;

/// First byte of the factory calibration EEPROM (AC1 MSB).
pub const CALIBRATION_TABLE: u8 = 0xAA;
/// 11 big-endian words, AC1..MD.
pub const CALIBRATION_LEN: usize = 22;

pub const DATA_REG_MSB: u8 = 0xF6;
pub const DATA_REG_LSB: u8 = 0xF7;
pub const DATA_REG_XLSB: u8 = 0xF8;
pub const CONTROL_REG: u8 = 0xF4;

pub const START_TEMPERATURE_MEASUREMENT: u8 = 0x2E;
/// OR'd with `oss << 6` to select the oversampling setting.
pub const START_PRESSURE_MEASUREMENT: u8 = 0x34;
