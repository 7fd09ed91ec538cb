//! Per-channel time series extracted from decoded frames

use crate::error::{Error, Result};
use itf_core::format::constants::CHANNEL_COUNT;
use itf_core::ChannelSource;
use rayon::prelude::*;

/// One channel's samples across the whole recording
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub channel: usize,
    /// Raw converter codes, or microvolts once calibrated
    pub samples: Vec<f64>,
}

impl ChannelSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Parallel port pins, one value per frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalPortSeries(pub Vec<u8>);

impl DigitalPortSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn samples(&self) -> &[u8] {
        &self.0
    }
}

/// All 128 channels plus the parallel port
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    pub channels: Vec<ChannelSeries>,
    pub digital_port: DigitalPortSeries,
}

impl ChannelSet {
    /// Samples per channel
    pub fn sample_count(&self) -> usize {
        self.digital_port.len()
    }
}

/// Split frames into per-channel series
///
/// Channels are independent, so each one is gathered on the rayon pool.
pub fn extract_channels<S: ChannelSource + Sync>(frames: &[S]) -> Result<ChannelSet> {
    let channels = (0..CHANNEL_COUNT)
        .into_par_iter()
        .map(|channel| extract_channel(frames, channel))
        .collect::<Result<Vec<_>>>()?;

    let digital_port = DigitalPortSeries(frames.iter().map(ChannelSource::parallel_port).collect());

    Ok(ChannelSet {
        channels,
        digital_port,
    })
}

/// Gather one channel's samples
pub fn extract_channel<S: ChannelSource>(frames: &[S], channel: usize) -> Result<ChannelSeries> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(frames.len())
        .map_err(|_| Error::AllocationFailure {
            bytes: (frames.len() * std::mem::size_of::<f64>()) as u64,
        })?;

    for frame in frames {
        samples.push(f64::from(frame.channel_code(channel)?));
    }

    Ok(ChannelSeries { channel, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itf_core::{Frame, ItfError};

    fn frames() -> Vec<Frame> {
        (0..5u8)
            .map(|record| {
                let mut frame = Frame::blank(record);
                frame.parallel_port = record * 2;
                for channel in 0..CHANNEL_COUNT {
                    let code = (channel as i32 - 64) * 1000 + i32::from(record);
                    frame.set_channel_code(channel, code).unwrap();
                }
                frame
            })
            .collect()
    }

    #[test]
    fn test_extract_channels() {
        let set = extract_channels(&frames()).unwrap();
        assert_eq!(set.channels.len(), CHANNEL_COUNT);
        assert_eq!(set.sample_count(), 5);
        for (index, series) in set.channels.iter().enumerate() {
            assert_eq!(series.channel, index);
            assert_eq!(series.len(), 5);
        }
        assert_eq!(set.channels[0].samples, vec![-64000.0, -63999.0, -63998.0, -63997.0, -63996.0]);
        assert_eq!(set.channels[127].samples[4], 63004.0);
        assert_eq!(set.digital_port.samples(), &[0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_extract_channel_rejects_bad_index() {
        let result = extract_channel(&frames(), 128);
        assert!(matches!(result, Err(Error::Format(ItfError::InvalidChannel))));
    }

    #[test]
    fn test_extract_from_no_frames() {
        let set = extract_channels::<Frame>(&[]).unwrap();
        assert!(set.channels.iter().all(ChannelSeries::is_empty));
        assert!(set.digital_port.is_empty());
    }
}
