//! Per-card amplifier settings
//!
//! Each of the 16 cards drives 8 channels and has its own on/off switch,
//! low-pass filter and gain. The settings are applied card-wide even though
//! the recording software lets users set them per channel.

use crate::calibration::scale_factor;
use crate::format::constants::calibration::{DEFAULT_LOW_PASS_HZ, UNCONFIGURED_GAIN};

/// Hardware low-pass filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LowPassFilter {
    #[default]
    Hz100,
    Hz300,
}

impl LowPassFilter {
    /// Map a raw selector; zero is 100 Hz, anything else 300 Hz
    pub const fn from_raw(raw: i64) -> Self {
        if raw == 0 {
            LowPassFilter::Hz100
        } else {
            LowPassFilter::Hz300
        }
    }

    pub const fn hz(self) -> f64 {
        match self {
            LowPassFilter::Hz100 => DEFAULT_LOW_PASS_HZ,
            LowPassFilter::Hz300 => 300.0,
        }
    }
}

/// Hardware gain selector
///
/// The raw codes are not in ascending order of gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GainSetting {
    X400 = 0,
    X10000 = 1,
    X2000 = 2,
}

impl GainSetting {
    pub const fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(GainSetting::X400),
            1 => Some(GainSetting::X10000),
            2 => Some(GainSetting::X2000),
            _ => None,
        }
    }

    pub const fn factor(self) -> f64 {
        match self {
            GainSetting::X400 => 400.0,
            GainSetting::X10000 => 10000.0,
            GainSetting::X2000 => 2000.0,
        }
    }
}

impl core::fmt::Display for GainSetting {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// Settings for one card
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardConfig {
    pub on: bool,
    pub low_pass: LowPassFilter,
    /// `None` until a recognised gain line is seen
    pub gain_setting: Option<GainSetting>,
}

impl CardConfig {
    /// Settings of a card the configuration never mentions
    pub const UNCONFIGURED: Self = Self {
        on: false,
        low_pass: LowPassFilter::Hz100,
        gain_setting: None,
    };

    /// Numeric gain; [`UNCONFIGURED_GAIN`] when no gain was configured
    pub fn gain(&self) -> f64 {
        self.gain_setting
            .map(GainSetting::factor)
            .unwrap_or(UNCONFIGURED_GAIN)
    }

    pub fn low_pass_hz(&self) -> f64 {
        self.low_pass.hz()
    }

    /// Multiplier from converter code to microvolts for this card
    pub fn scale_factor(&self) -> f64 {
        scale_factor(self.gain())
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self::UNCONFIGURED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let card = CardConfig::default();
        assert!(!card.on);
        assert_eq!(card.gain(), 450.0);
        assert_eq!(card.low_pass_hz(), 100.0);
    }

    #[test]
    fn test_gain_codes() {
        assert_eq!(GainSetting::from_raw(0).map(GainSetting::factor), Some(400.0));
        assert_eq!(GainSetting::from_raw(1).map(GainSetting::factor), Some(10000.0));
        assert_eq!(GainSetting::from_raw(2).map(GainSetting::factor), Some(2000.0));
        assert_eq!(GainSetting::from_raw(3), None);
        assert_eq!(GainSetting::from_raw(-1), None);
    }

    #[test]
    fn test_low_pass_codes() {
        assert_eq!(LowPassFilter::from_raw(0).hz(), 100.0);
        assert_eq!(LowPassFilter::from_raw(1).hz(), 300.0);
        assert_eq!(LowPassFilter::from_raw(7).hz(), 300.0);
    }
}
