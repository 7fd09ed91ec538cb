//! Packed 24-bit converter samples
//!
//! Every channel value travels as three bytes holding a big-endian 24-bit
//! two's complement integer.

use super::constants::SAMPLE_SIZE;

/// Smallest code a sample can hold, -2^23
pub const SAMPLE_MIN: i32 = -(1 << 23);

/// Largest code a sample can hold, 2^23 - 1
pub const SAMPLE_MAX: i32 = (1 << 23) - 1;

/// One packed sample exactly as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreeByteSample {
    pub msb: u8,
    pub middle: u8,
    pub lsb: u8,
}

impl ThreeByteSample {
    /// Read a sample from the first three bytes of `bytes`
    pub const fn from_bytes(bytes: [u8; SAMPLE_SIZE]) -> Self {
        Self {
            msb: bytes[0],
            middle: bytes[1],
            lsb: bytes[2],
        }
    }

    /// Pack a signed code; bits above the low 24 are discarded
    pub const fn from_code(code: i32) -> Self {
        Self {
            msb: (code >> 16) as u8,
            middle: (code >> 8) as u8,
            lsb: code as u8,
        }
    }

    pub const fn to_bytes(self) -> [u8; SAMPLE_SIZE] {
        [self.msb, self.middle, self.lsb]
    }

    /// Signed converter code
    pub const fn code(self) -> i32 {
        sample_to_signed(self.msb, self.middle, self.lsb)
    }
}

/// Assemble three big-endian bytes into a sign-extended 24-bit integer
///
/// The bytes are placed in the top three bytes of an `i32` and shifted back
/// down arithmetically, which copies bit 23 into the top byte.
pub const fn sample_to_signed(b0: u8, b1: u8, b2: u8) -> i32 {
    i32::from_be_bytes([b0, b1, b2, 0]) >> 8
}
