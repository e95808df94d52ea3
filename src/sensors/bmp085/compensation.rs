//! Fixed-point compensation from the BMP085 datasheet.
//!
//! All arithmetic reproduces 32-bit C semantics: `i32` for the X/B3/B5/B6
//! family, `u32` for B4/B7, arithmetic right shifts, truncating division and
//! two's-complement wrap on overflow.

use super::calibration::Calibration;
use super::oversampling::Oversampling;

/// Output of one compensation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compensated {
    /// Intermediate temperature term shared with the pressure formula.
    pub b5: i32,
    /// Temperature in 0.1 °C.
    pub temperature: i32,
    /// Pressure in Pa.
    pub pressure: i32,
}

// A zero divisor only appears with a corrupted table; yield 0 rather than trap.
fn quotient(n: i32, d: i32) -> i32 {
    n.checked_div(d).unwrap_or(0)
}

/// Returns `(temperature in 0.1 °C, b5)` for the raw temperature count `ut`.
pub fn compensate_temperature(cal: &Calibration, ut: u16) -> (i32, i32) {
    let x1 = (ut as i32 - cal.ac6 as i32).wrapping_mul(cal.ac5 as i32) >> 15;
    let x2 = quotient((cal.mc as i32) << 11, x1.wrapping_add(cal.md as i32));
    let b5 = x1.wrapping_add(x2);
    (b5.wrapping_add(8) >> 4, b5)
}

/// Pressure in Pa for the raw pressure count `up` (already shifted by `8 - oss`).
pub fn compensate_pressure(cal: &Calibration, up: i32, b5: i32, mode: Oversampling) -> i32 {
    let oss = mode.oss() as u32;

    let b6 = b5.wrapping_sub(4000);
    let b6_sq = b6.wrapping_mul(b6) >> 12;

    let x1 = (cal.b2 as i32).wrapping_mul(b6_sq) >> 11;
    let x2 = (cal.ac2 as i32).wrapping_mul(b6) >> 11;
    let x3 = x1.wrapping_add(x2);
    let b3 = ((cal.ac1 as i32).wrapping_mul(4).wrapping_add(x3).wrapping_shl(oss)).wrapping_add(2) / 4;

    let x1 = (cal.ac3 as i32).wrapping_mul(b6) >> 13;
    let x2 = (cal.b1 as i32).wrapping_mul(b6_sq) >> 16;
    let x3 = x1.wrapping_add(x2).wrapping_add(2) >> 2;
    let b4 = (cal.ac4 as u32).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;
    let b7 = (up as u32).wrapping_sub(b3 as u32).wrapping_mul(50000 >> oss);

    let p = if b7 < 0x8000_0000 {
        b7.wrapping_mul(2).checked_div(b4)
    } else {
        b7.checked_div(b4).map(|q| q.wrapping_mul(2))
    };
    let p = p.unwrap_or(0) as i32;

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = (-7357i32).wrapping_mul(p) >> 16;
    p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4)
}

/// Run the full datasheet formula. Pure; performs no I/O and cannot fail.
pub fn compensate(cal: &Calibration, ut: u16, up: i32, mode: Oversampling) -> Compensated {
    let (temperature, b5) = compensate_temperature(cal, ut);
    let pressure = compensate_pressure(cal, up, b5, mode);
    Compensated { b5, temperature, pressure }
}
