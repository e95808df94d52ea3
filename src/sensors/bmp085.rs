//! Bosch BMP085 barometric pressure / temperature sensor.
//!
//! A [`Bmp085`] only comes into existence after its calibration table has
//! been read, so an uncalibrated handle cannot be measured from.

pub mod calibration;
pub mod compensation;
pub mod oversampling;
pub mod registers;

use tracing::{debug, warn};

use crate::bus::Bus;
use crate::errors::{BusError, InitResult, MeasureError, MeasurePhase, MeasureResult};

pub use calibration::Calibration;
pub use compensation::{compensate, Compensated};
pub use oversampling::{ModeProfile, Oversampling};
use registers::*;

/// One completed temperature + pressure cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Bytes read from 0xF6/0xF7 after the temperature conversion.
    pub raw_temperature: [u8; 2],
    /// MSB, LSB, XLSB after the pressure conversion.
    pub raw_pressure: [u8; 3],
    /// Raw temperature count (UT).
    pub ut: u16,
    /// Raw pressure count (UP), shifted for the oversampling setting.
    pub up: i32,
    /// Temperature in 0.1 °C.
    pub temperature: i32,
    /// Pressure in Pa.
    pub pressure: i32,
}

impl Measurement {
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature as f32 * 0.1
    }
}

/// A calibrated BMP085 on a borrowed bus.
///
/// ```no_run
/// use bmp085_sensorhub::{Bmp085, I2CBus, Oversampling};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut bus = I2CBus::new("/dev/i2c-1")?;
///     let mut sensor = Bmp085::new(&mut bus, 0x77, Oversampling::Standard)?;
///     let reading = sensor.measure()?;
///     println!("{:.1} °C, {} Pa", reading.temperature_celsius(), reading.pressure);
///     Ok(())
/// }
/// ```
///
/// The fields are private, so a handle cannot be assembled without the
/// calibration read:
///
/// ```compile_fail
/// use bmp085_sensorhub::{Bmp085, Calibration, I2CBus, Oversampling};
///
/// fn uncalibrated(bus: &mut I2CBus, calibration: Calibration) {
///     let mut sensor = Bmp085 { bus, address: 0x77, mode: Oversampling::Standard, calibration, last: None };
///     let _ = sensor.measure();
/// }
/// ```
pub struct Bmp085<'a, B: Bus + ?Sized> {
    bus: &'a mut B,
    address: u8,
    mode: Oversampling,
    calibration: Calibration,
    last: Option<Measurement>,
}

impl<'a, B: Bus + ?Sized> Bmp085<'a, B> {
    /// Validate a raw oversampling ordinal, then calibrate.
    ///
    /// An out-of-range `mode` is rejected before any bus traffic.
    pub fn initialize(bus: &'a mut B, address: u8, mode: u8) -> InitResult<Self> {
        let mode = Oversampling::try_from(mode)?;
        Self::new(bus, address, mode)
    }

    /// Read the 22-byte calibration table and build the handle.
    pub fn new(bus: &'a mut B, address: u8, mode: Oversampling) -> InitResult<Self> {
        let mut raw = [0u8; CALIBRATION_LEN];
        if let Err(e) = bus.read_bytes(address, CALIBRATION_TABLE, &mut raw) {
            warn!("[bmp085@{:#04x}] calibration read failed: {}", address, e);
            return Err(e.into());
        }

        let calibration = Calibration::from_bytes(&raw);
        let suspicious = calibration.suspicious_words();
        if !suspicious.is_empty() {
            warn!(
                "[bmp085@{:#04x}] calibration words {:?} read as 0x0000/0xFFFF, device may not be responding",
                address, suspicious
            );
        }
        debug!("[bmp085@{:#04x}] calibrated, mode {}: {:?}", address, mode, calibration);

        Ok(Self { bus, address, mode, calibration, last: None })
    }

    /// Run one temperature conversion followed by one pressure conversion.
    ///
    /// On a bus error nothing on the handle changes; the previous
    /// measurement stays available.
    pub fn measure(&mut self) -> MeasureResult<Measurement> {
        let profile = *self.mode.profile();

        self.write_control(START_TEMPERATURE_MEASUREMENT, MeasurePhase::StartTemperature)?;
        self.bus.delay_ns(profile.temperature_delay_ns);

        let mut raw_temperature = [0u8; 2];
        self.read(DATA_REG_MSB, &mut raw_temperature, MeasurePhase::ReadTemperature)?;
        let ut = u16::from_be_bytes(raw_temperature);

        self.write_control(profile.pressure_command, MeasurePhase::StartPressure)?;
        self.bus.delay_ns(profile.pressure_delay_ns);

        let mut raw_pressure = [0u8; 3];
        self.read(DATA_REG_MSB, &mut raw_pressure[..2], MeasurePhase::ReadPressure)?;
        self.read(DATA_REG_XLSB, &mut raw_pressure[2..], MeasurePhase::ReadPressure)?;
        let up = ((raw_pressure[0] as i32) << 16 | (raw_pressure[1] as i32) << 8 | raw_pressure[2] as i32)
            >> profile.pressure_shift;

        let out = compensate(&self.calibration, ut, up, self.mode);
        let measurement = Measurement {
            raw_temperature,
            raw_pressure,
            ut,
            up,
            temperature: out.temperature,
            pressure: out.pressure,
        };
        debug!(
            "[bmp085@{:#04x}] UT={} UP={} -> {} dC, {} Pa",
            self.address, ut, up, out.temperature, out.pressure
        );

        self.last = Some(measurement);
        Ok(measurement)
    }

    fn write_control(&mut self, command: u8, phase: MeasurePhase) -> MeasureResult<()> {
        self.bus
            .write_byte(self.address, CONTROL_REG, command)
            .map_err(|source| self.bus_failure(phase, source))
    }

    fn read(&mut self, reg: u8, buf: &mut [u8], phase: MeasurePhase) -> MeasureResult<()> {
        self.bus
            .read_bytes(self.address, reg, buf)
            .map_err(|source| self.bus_failure(phase, source))
    }

    fn bus_failure(&self, phase: MeasurePhase, source: BusError) -> MeasureError {
        warn!("[bmp085@{:#04x}] {} failed: {}", self.address, phase, source);
        MeasureError::Bus { phase, source }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn mode(&self) -> Oversampling {
        self.mode
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Calibration coefficients, one `NAME = \tvalue` line each.
    pub fn format_calibration_table(&self) -> String {
        self.calibration.to_string()
    }

    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.last.as_ref()
    }

    /// Last temperature in °C.
    pub fn temperature(&self) -> Option<f32> {
        self.last.map(|m| m.temperature_celsius())
    }

    /// Last pressure in Pa.
    pub fn pressure(&self) -> Option<i32> {
        self.last.map(|m| m.pressure)
    }

    pub fn raw_temperature(&self) -> Option<u16> {
        self.last.map(|m| m.ut)
    }

    pub fn raw_pressure(&self) -> Option<i32> {
        self.last.map(|m| m.up)
    }
}
