//! Machine-readable description of a decode run

#[cfg(feature = "serde")]
use crate::error::{Error, Result};
use itf_core::format::constants::SAMPLES_PER_SECOND;
use crate::status::FrameStatusSeries;
use itf_core::CardSettings;
#[cfg(feature = "serde")]
use std::path::Path;

/// Settings of one amplifier card as used for calibration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardSummary {
    pub card: usize,
    pub on: bool,
    pub low_pass_hz: f64,
    pub gain: f64,
    /// Microvolts per converter code
    pub scale_factor: f64,
}

/// Outcome of decoding one recording
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeSummary {
    pub source: String,
    pub frames: usize,
    /// Indices of frames that failed the marker check
    pub bad_frames: Vec<usize>,
    pub skipped_bytes: usize,
    pub trailing_bytes: usize,
    /// Records absent from the record number sequence
    pub missing_records: u64,
    /// Unwrapped record positions of the missing records
    pub missing_positions: Vec<u64>,
    /// Frames whose error flags report a buffer overflow
    pub overflow_frames: Vec<usize>,
    pub samples_per_second: f64,
    pub calibrated: bool,
    pub config_path: Option<String>,
    /// Channels present in the exported table
    pub channels: Vec<usize>,
    pub cards: Vec<CardSummary>,
    pub frame_status: FrameStatusSeries,
}

impl DecodeSummary {
    /// Per-card entries for a configuration
    pub fn cards_from(settings: &CardSettings) -> Vec<CardSummary> {
        settings
            .cards()
            .iter()
            .enumerate()
            .map(|(card, config)| CardSummary {
                card,
                on: config.on,
                low_pass_hz: config.low_pass_hz(),
                gain: config.gain(),
                scale_factor: config.scale_factor(),
            })
            .collect()
    }

    pub const fn samples_per_second() -> f64 {
        SAMPLES_PER_SECOND
    }

    /// Recording length in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frames as f64 / self.samples_per_second
    }

    /// Serialize as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`
    #[cfg(feature = "serde")]
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
        tracing::debug!("Wrote summary to '{}'", path.display());
        Ok(())
    }
}
