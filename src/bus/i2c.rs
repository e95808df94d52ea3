use std::time::Duration;

#[cfg(target_os = "linux")]
use i2cdev::core::{I2CMessage, I2CTransfer};
#[cfg(target_os = "linux")]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError, LinuxI2CMessage};
use tracing::debug;

use super::Bus;
use crate::errors::{BusError, BusResult};

/// I2C bus error type - platform specific
#[cfg(target_os = "linux")]
pub type I2CError = LinuxI2CError;

#[cfg(not(target_os = "linux"))]
#[derive(Debug)]
pub struct I2CError(String);

#[cfg(not(target_os = "linux"))]
impl std::fmt::Display for I2CError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2C not supported on this platform: {}", self.0)
    }
}

#[cfg(not(target_os = "linux"))]
impl std::error::Error for I2CError {}

/// `reg` followed by `payload`, as sent in a single write message.
fn register_frame(reg: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + 1);
    frame.push(reg);
    frame.extend_from_slice(payload);
    frame
}

/// A combined transfer only counts when every message went through.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn check_transfer(register: u8, expected: u32, transferred: u32) -> BusResult<()> {
    if transferred != expected {
        return Err(BusError::ShortTransfer { register, expected, transferred });
    }
    Ok(())
}

/// I2C bus backed by a Linux `/dev/i2c-N` character device
#[cfg(target_os = "linux")]
pub struct I2CBus {
    path: String,
    device: LinuxI2CDevice,
    address: Option<u8>,
}

#[cfg(not(target_os = "linux"))]
pub struct I2CBus {
    path: String,
}

impl I2CBus {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(target_os = "linux")]
impl I2CBus {
    pub fn new(path: &str) -> BusResult<Self> {
        // Slave address 0 is a placeholder; every transaction selects its own.
        let device = LinuxI2CDevice::new(path, 0)?;
        debug!("[i2c] opened {}", path);
        Ok(Self { path: path.to_string(), device, address: None })
    }

    fn select(&mut self, address: u8) -> BusResult<()> {
        if self.address != Some(address) {
            self.device.set_slave_address(address as u16)?;
            self.address = Some(address);
        }
        Ok(())
    }
}

#[cfg(target_os = "linux")]
impl Bus for I2CBus {
    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        self.select(address)?;

        let reg_buf = [reg];
        let mut msgs = [LinuxI2CMessage::write(&reg_buf), LinuxI2CMessage::read(buf)];
        let transferred = self.device.transfer(&mut msgs)?;
        check_transfer(reg, 2, transferred)
    }

    fn write_bytes(&mut self, address: u8, reg: u8, payload: &[u8]) -> BusResult<()> {
        self.select(address)?;

        let frame = register_frame(reg, payload);
        let mut msgs = [LinuxI2CMessage::write(&frame)];
        let transferred = self.device.transfer(&mut msgs)?;
        check_transfer(reg, 1, transferred)
    }

    fn delay_ns(&mut self, nanos: u64) {
        std::thread::sleep(Duration::from_nanos(nanos));
    }
}

#[cfg(not(target_os = "linux"))]
impl I2CBus {
    pub fn new(path: &str) -> BusResult<Self> {
        debug!("[i2c] {} requested on a platform without i2c-dev", path);
        Err(I2CError(path.to_string()).into())
    }

    fn unsupported(&self) -> BusError {
        I2CError(self.path.clone()).into()
    }
}

#[cfg(not(target_os = "linux"))]
impl Bus for I2CBus {
    fn read_bytes(&mut self, _address: u8, _reg: u8, _buf: &mut [u8]) -> BusResult<()> {
        Err(self.unsupported())
    }

    fn write_bytes(&mut self, _address: u8, _reg: u8, _payload: &[u8]) -> BusResult<()> {
        Err(self.unsupported())
    }

    fn delay_ns(&mut self, nanos: u64) {
        std::thread::sleep(Duration::from_nanos(nanos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_frame_layout() {
        assert_eq!(register_frame(0xF4, &[0x2E]), vec![0xF4, 0x2E]);
        assert_eq!(register_frame(0xAA, &[]), vec![0xAA]);
    }

    #[test]
    fn test_incomplete_transfer_is_an_error() {
        // A control-register write that did not go out must not read as success.
        assert!(check_transfer(0xF4, 1, 1).is_ok());
        assert!(matches!(
            check_transfer(0xF4, 1, 0),
            Err(BusError::ShortTransfer { register: 0xF4, expected: 1, transferred: 0 })
        ));
        assert!(matches!(
            check_transfer(0xF6, 2, 1),
            Err(BusError::ShortTransfer { register: 0xF6, expected: 2, transferred: 1 })
        ));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_stub_bus_reports_platform_error() {
        assert!(matches!(I2CBus::new("/dev/i2c-1"), Err(BusError::I2cError(_))));
    }
}
