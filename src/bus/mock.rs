//! In-process bus double: a flat register file with a transaction log and
//! failure injection.

use std::collections::VecDeque;

use super::Bus;
use crate::errors::{BusError, BusResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { address: u8, register: u8, payload: Vec<u8> },
    Read { address: u8, register: u8, len: usize },
    Delay(u64),
}

pub struct MockBus {
    pub registers: [u8; 256],
    pub log: Vec<Transaction>,
    conversions: VecDeque<([u8; 2], [u8; 3])>,
    fail_at: Option<usize>,
    transfers: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            log: Vec::new(),
            conversions: VecDeque::new(),
            fail_at: None,
            transfers: 0,
        }
    }

    pub fn with_registers(mut self, start: u8, bytes: &[u8]) -> Self {
        let start = start as usize;
        self.registers[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Queue the values the data registers take after a temperature /
    /// pressure conversion command lands in the control register. Each
    /// pressure command consumes one queued sample.
    pub fn with_conversion(mut self, temperature: [u8; 2], pressure: [u8; 3]) -> Self {
        self.conversions.push_back((temperature, pressure));
        self
    }

    /// Fail the `index`-th read or write (0-based, delays not counted).
    pub fn fail_at(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    pub fn transfers(&self) -> usize {
        self.transfers
    }

    fn next_transfer(&mut self) -> BusResult<()> {
        let index = self.transfers;
        self.transfers += 1;
        if self.fail_at == Some(index) {
            return Err(BusError::Transfer(format!("injected failure at transfer {}", index)));
        }
        Ok(())
    }
}

impl Bus for MockBus {
    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        self.next_transfer()?;
        self.log.push(Transaction::Read { address, register: reg, len: buf.len() });
        let start = reg as usize;
        buf.copy_from_slice(&self.registers[start..start + buf.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, address: u8, reg: u8, payload: &[u8]) -> BusResult<()> {
        self.next_transfer()?;
        self.log.push(Transaction::Write { address, register: reg, payload: payload.to_vec() });

        let start = reg as usize;
        self.registers[start..start + payload.len()].copy_from_slice(payload);

        if let (0xF4, Some(&cmd)) = (reg, payload.first()) {
            if cmd == 0x2E {
                if let Some((temperature, _)) = self.conversions.front() {
                    self.registers[0xF6..0xF8].copy_from_slice(temperature);
                }
            } else if cmd & 0x3F == 0x34 {
                if let Some((_, pressure)) = self.conversions.pop_front() {
                    self.registers[0xF6..0xF9].copy_from_slice(&pressure);
                }
            }
        }
        Ok(())
    }

    fn delay_ns(&mut self, nanos: u64) {
        self.log.push(Transaction::Delay(nanos));
    }
}
