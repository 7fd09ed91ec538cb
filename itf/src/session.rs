//! The full decode pipeline: frames, channels, calibration

use crate::channels::{extract_channels, ChannelSeries, ChannelSet, DigitalPortSeries};
use crate::config_loader::{load_card_config, load_companion, ConfigReport};
use crate::error::{Error, Result};
use crate::export::write_table;
use crate::gain::apply_gains;
use crate::options::DecodeOptions;
use crate::reader::read_frames;
use crate::status::FrameStatusSeries;
use crate::summary::DecodeSummary;
use itf_core::{CardMap, CardSettings};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A decoded recording, ready for export
#[derive(Debug, Clone)]
pub struct DecodedRecording {
    pub source: PathBuf,
    /// Channel series; only enabled cards' channels when so requested
    pub channels: ChannelSet,
    /// Header fields of every frame
    pub frame_status: FrameStatusSeries,
    pub bad_frames: Vec<usize>,
    pub skipped_bytes: usize,
    pub trailing_bytes: usize,
    pub missing_records: u64,
    /// Card settings that were found, whether or not they were applied
    pub config: Option<ConfigReport>,
    calibrated: bool,
}

impl DecodedRecording {
    pub fn frame_count(&self) -> usize {
        self.channels.sample_count()
    }

    pub fn channels(&self) -> &[ChannelSeries] {
        &self.channels.channels
    }

    pub fn digital_port(&self) -> &DigitalPortSeries {
        &self.channels.digital_port
    }

    /// Samples are in microvolts rather than raw codes
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Write the channel table to `path`
    pub fn write_table<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_table(self.channels(), self.digital_port(), path)
    }

    /// Write the per-frame header rows to `path`
    pub fn write_frame_status<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.frame_status
            .write_to(&mut writer)
            .map_err(|e| match e {
                Error::Io { source, .. } => Error::io(path, source),
                other => other,
            })?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    pub fn summary(&self) -> DecodeSummary {
        let settings = self
            .config
            .as_ref()
            .map_or_else(CardSettings::new, |report| report.settings);

        DecodeSummary {
            source: self.source.display().to_string(),
            frames: self.frame_count(),
            bad_frames: self.bad_frames.clone(),
            skipped_bytes: self.skipped_bytes,
            trailing_bytes: self.trailing_bytes,
            missing_records: self.missing_records,
            missing_positions: self.frame_status.missing_positions(),
            overflow_frames: self.frame_status.overflow_frames(),
            samples_per_second: DecodeSummary::samples_per_second(),
            calibrated: self.is_calibrated(),
            config_path: self
                .config
                .as_ref()
                .map(|report| report.path.display().to_string()),
            channels: self.channels().iter().map(|series| series.channel).collect(),
            cards: DecodeSummary::cards_from(&settings),
            frame_status: self.frame_status.clone(),
        }
    }
}

/// Entry point for decoding `.itf` recordings
pub struct DecodeSession;

impl DecodeSession {
    /// Decode a recording into calibrated channel series
    ///
    /// Calibration is skipped when disabled in `options` or when no card
    /// settings can be found; the samples then stay raw converter codes.
    pub fn run<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<DecodedRecording> {
        let path = path.as_ref();
        let frame_set = read_frames(path, options)?;

        let frame_status = FrameStatusSeries::from_frames(&frame_set.frames);
        let missing_records = frame_status.missing_records;
        if missing_records > 0 {
            warn!("{missing_records} records missing from the record number sequence");
        }

        let mut channels = extract_channels(&frame_set.frames)?;
        debug!(
            "Extracted {} samples for each of {} channels",
            channels.sample_count(),
            channels.channels.len()
        );
        drop(frame_set.frames);

        let config = if options.calibrate || options.enabled_cards_only {
            match &options.config_path {
                Some(config_path) => Some(load_card_config(config_path)?),
                None => load_companion(path)?,
            }
        } else {
            None
        };

        let calibrated = match (&config, options.calibrate) {
            (Some(report), true) => {
                apply_gains(&mut channels.channels, &report.settings, &options.card_map)?;
                true
            }
            (_, false) => {
                info!("Calibration disabled, writing raw converter codes");
                false
            }
            (None, true) => false,
        };

        if options.enabled_cards_only {
            match &config {
                Some(report) => {
                    retain_enabled(&mut channels.channels, &report.settings, &options.card_map)?
                }
                None => warn!("No card settings, keeping every channel"),
            }
        }

        Ok(DecodedRecording {
            source: path.to_path_buf(),
            channels,
            frame_status,
            bad_frames: frame_set.bad_frames,
            skipped_bytes: frame_set.skipped_bytes,
            trailing_bytes: frame_set.trailing_bytes,
            missing_records,
            config,
            calibrated,
        })
    }
}

/// Drop channels whose governing card is switched off
fn retain_enabled(
    channels: &mut Vec<ChannelSeries>,
    cards: &CardSettings,
    card_map: &CardMap,
) -> Result<()> {
    let mut enabled = Vec::with_capacity(channels.len());
    for series in channels.iter() {
        let card = card_map.card_for_channel(series.channel)?;
        enabled.push(cards.card(card)?.on);
    }

    let mut flags = enabled.into_iter();
    channels.retain(|_| flags.next().unwrap_or(false));
    debug!("Keeping {} channels on enabled cards", channels.len());
    Ok(())
}
