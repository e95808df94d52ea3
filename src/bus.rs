pub mod i2c;
#[cfg(test)]
pub mod mock;

use crate::errors::BusResult;

/// Register-oriented transaction primitives a sensor driver needs from its bus.
///
/// Every call addresses the device first, so one bus can serve several
/// devices. Implementations must either complete a transfer fully or return
/// an error; a short transfer is an error.
pub trait Bus {
    /// Select `address`, write `reg`, then read exactly `buf.len()` bytes into `buf`.
    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()>;

    /// Select `address` and write `reg` followed by `payload` as one transfer.
    fn write_bytes(&mut self, address: u8, reg: u8, payload: &[u8]) -> BusResult<()>;

    fn write_byte(&mut self, address: u8, reg: u8, byte: u8) -> BusResult<()> {
        self.write_bytes(address, reg, &[byte])
    }

    /// Block for at least `nanos` nanoseconds.
    fn delay_ns(&mut self, nanos: u64);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        (**self).read_bytes(address, reg, buf)
    }

    fn write_bytes(&mut self, address: u8, reg: u8, payload: &[u8]) -> BusResult<()> {
        (**self).write_bytes(address, reg, payload)
    }

    fn write_byte(&mut self, address: u8, reg: u8, byte: u8) -> BusResult<()> {
        (**self).write_byte(address, reg, byte)
    }

    fn delay_ns(&mut self, nanos: u64) {
        (**self).delay_ns(nanos)
    }
}

/// Bus type enum for different communication interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusType {
    I2C,
}

impl BusType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i2c" => Some(BusType::I2C),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_type_parsing() {
        assert_eq!(BusType::from_str("i2c"), Some(BusType::I2C));
        assert_eq!(BusType::from_str("I2C"), Some(BusType::I2C));
        assert_eq!(BusType::from_str("serial"), None);
    }
}
