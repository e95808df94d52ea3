use std::fmt;

use super::registers::CALIBRATION_LEN;

/// Factory calibration coefficients, programmed per device into EEPROM.
///
/// AC4, AC5 and AC6 are unsigned; every other word is two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

pub const COEFFICIENT_NAMES: [&str; 11] =
    ["AC1", "AC2", "AC3", "AC4", "AC5", "AC6", "B1", "B2", "MB", "MC", "MD"];

impl Calibration {
    /// Decode the 22-byte block read from 0xAA (big-endian words).
    pub fn from_bytes(raw: &[u8; CALIBRATION_LEN]) -> Self {
        let word = |i: usize| [raw[2 * i], raw[2 * i + 1]];
        Self {
            ac1: i16::from_be_bytes(word(0)),
            ac2: i16::from_be_bytes(word(1)),
            ac3: i16::from_be_bytes(word(2)),
            ac4: u16::from_be_bytes(word(3)),
            ac5: u16::from_be_bytes(word(4)),
            ac6: u16::from_be_bytes(word(5)),
            b1: i16::from_be_bytes(word(6)),
            b2: i16::from_be_bytes(word(7)),
            mb: i16::from_be_bytes(word(8)),
            mc: i16::from_be_bytes(word(9)),
            md: i16::from_be_bytes(word(10)),
        }
    }

    pub fn to_bytes(&self) -> [u8; CALIBRATION_LEN] {
        let words = [
            self.ac1.to_be_bytes(),
            self.ac2.to_be_bytes(),
            self.ac3.to_be_bytes(),
            self.ac4.to_be_bytes(),
            self.ac5.to_be_bytes(),
            self.ac6.to_be_bytes(),
            self.b1.to_be_bytes(),
            self.b2.to_be_bytes(),
            self.mb.to_be_bytes(),
            self.mc.to_be_bytes(),
            self.md.to_be_bytes(),
        ];
        let mut raw = [0u8; CALIBRATION_LEN];
        for (chunk, word) in raw.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word);
        }
        raw
    }

    /// Coefficients in table order, widened so signed and unsigned words
    /// print with their own domain.
    pub fn entries(&self) -> [(&'static str, i32); 11] {
        let values = [
            self.ac1 as i32,
            self.ac2 as i32,
            self.ac3 as i32,
            self.ac4 as i32,
            self.ac5 as i32,
            self.ac6 as i32,
            self.b1 as i32,
            self.b2 as i32,
            self.mb as i32,
            self.mc as i32,
            self.md as i32,
        ];
        let mut out = [("", 0); 11];
        for (slot, (name, value)) in out.iter_mut().zip(COEFFICIENT_NAMES.iter().zip(values)) {
            *slot = (*name, value);
        }
        out
    }

    /// Names of words reading 0x0000 or 0xFFFF, which the datasheet treats
    /// as a sign of a failed EEPROM read.
    pub fn suspicious_words(&self) -> Vec<&'static str> {
        let raw = self.to_bytes();
        raw.chunks_exact(2)
            .zip(COEFFICIENT_NAMES)
            .filter(|(w, _)| **w == [0x00, 0x00] || **w == [0xFF, 0xFF])
            .map(|(_, name)| name)
            .collect()
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.entries() {
            writeln!(f, "{} = \t{}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Worked example from the BMP085 datasheet.
    pub(crate) const DATASHEET: Calibration = Calibration {
        ac1: 408,
        ac2: -72,
        ac3: -14383,
        ac4: 32741,
        ac5: 32757,
        ac6: 23153,
        b1: 6190,
        b2: 4,
        mb: -32768,
        mc: -8711,
        md: 2868,
    };

    #[test]
    fn test_decode_encode_preserves_bytes() {
        let blocks: [[u8; CALIBRATION_LEN]; 3] = [
            DATASHEET.to_bytes(),
            [0xFF; CALIBRATION_LEN],
            core::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(0x81)),
        ];
        for raw in blocks {
            assert_eq!(Calibration::from_bytes(&raw).to_bytes(), raw);
        }
    }

    #[test]
    fn test_signedness_split() {
        let cal = Calibration::from_bytes(&[0xFF; CALIBRATION_LEN]);
        assert_eq!((cal.ac4, cal.ac5, cal.ac6), (0xFFFF, 0xFFFF, 0xFFFF));
        for v in [cal.ac1, cal.ac2, cal.ac3, cal.b1, cal.b2, cal.mb, cal.mc, cal.md] {
            assert_eq!(v, -1);
        }

        let entries = cal.entries();
        assert_eq!(entries[3], ("AC4", 65535));
        assert_eq!(entries[0], ("AC1", -1));
    }

    #[test]
    fn test_decode_datasheet_block() {
        let raw = [
            0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E,
            0x00, 0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
        ];
        assert_eq!(Calibration::from_bytes(&raw), DATASHEET);
    }

    #[test]
    fn test_table_formatting() {
        let text = DATASHEET.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "AC1 = \t408");
        assert_eq!(lines[4], "AC5 = \t32757");
        assert_eq!(lines[8], "MB = \t-32768");
        assert_eq!(lines[10], "MD = \t2868");
    }

    #[test]
    fn test_suspicious_words() {
        assert!(DATASHEET.suspicious_words().is_empty());
        let mut cal = DATASHEET;
        cal.b2 = 0;
        cal.ac5 = 0xFFFF;
        assert_eq!(cal.suspicious_words(), vec!["AC5", "B2"]);
    }
}
