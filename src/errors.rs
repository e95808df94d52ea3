use thiserror::Error;
use crate::bus::i2c::I2CError;

/// Failures raised by the bus transaction primitives
#[derive(Error, Debug)]
pub enum BusError {
    #[error("I2C communication failed: {0}")]
    I2cError(#[from] I2CError),

    #[error("I2C short transfer at register {register:#04x}: {transferred} of {expected} message(s) completed")]
    ShortTransfer { register: u8, expected: u32, transferred: u32 },

    /// Used by in-process bus doubles
    #[error("Bus transfer failed: {0}")]
    Transfer(String),
}

/// Failures while bringing up a sensor handle
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Unsupported oversampling mode {0} (expected 0..=3)")]
    InvalidMode(u8),

    #[error("Failed to read calibration table: {0}")]
    Bus(#[from] BusError),
}

/// Step of the measurement sequence a bus failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurePhase {
    StartTemperature,
    ReadTemperature,
    StartPressure,
    ReadPressure,
}

impl std::fmt::Display for MeasurePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MeasurePhase::StartTemperature => "start temperature conversion",
            MeasurePhase::ReadTemperature => "read raw temperature",
            MeasurePhase::StartPressure => "start pressure conversion",
            MeasurePhase::ReadPressure => "read raw pressure",
        };
        f.write_str(name)
    }
}

/// Failures during a temperature/pressure measurement cycle
#[derive(Error, Debug)]
pub enum MeasureError {
    #[error("Measurement aborted during '{phase}': {source}")]
    Bus {
        phase: MeasurePhase,
        #[source]
        source: BusError,
    },
}

impl MeasureError {
    pub fn phase(&self) -> MeasurePhase {
        match self {
            MeasureError::Bus { phase, .. } => *phase,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Bus '{bus}' not found or unavailable")]
    BusNotFound { bus: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Station front-end errors
#[derive(Error, Debug)]
pub enum StationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Sensor '{sensor}' initialization failed: {source}")]
    Init {
        sensor: String,
        #[source]
        source: InitError,
    },

    #[error("Sensor '{sensor}' bus unavailable: {source}")]
    Bus {
        sensor: String,
        #[source]
        source: BusError,
    },

    #[error("No sensor could be started")]
    NoSensors,
}

/// Result type aliases for convenience
pub type BusResult<T> = Result<T, BusError>;
pub type InitResult<T> = Result<T, InitError>;
pub type MeasureResult<T> = Result<T, MeasureError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type StationResult<T> = Result<T, StationError>;
