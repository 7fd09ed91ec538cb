//! Per-frame header fields: record positions, flags, transmit register

use crate::error::{Error, Result};
use itf_core::{ErrorFlags, Frame, RecordCounter};
use std::io::Write;

/// Header fields of every frame, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameStatusSeries {
    /// Record number unwrapped past 255, relative to the first frame
    pub record_positions: Vec<u64>,
    pub error_flags: Vec<u8>,
    pub status_flags: Vec<u8>,
    /// Transmit register, msb first
    pub transmit_register: Vec<u16>,
    /// Records absent from the sequence
    pub missing_records: u64,
}

impl FrameStatusSeries {
    pub fn from_frames(frames: &[Frame]) -> Self {
        let mut counter = RecordCounter::new();
        let mut series = Self {
            record_positions: Vec::with_capacity(frames.len()),
            error_flags: Vec::with_capacity(frames.len()),
            status_flags: Vec::with_capacity(frames.len()),
            transmit_register: Vec::with_capacity(frames.len()),
            missing_records: 0,
        };

        for frame in frames {
            series.record_positions.push(counter.observe(frame.record_number));
            series.error_flags.push(frame.error_flags.0);
            series.status_flags.push(frame.status_flags.0);
            series
                .transmit_register
                .push(u16::from_be_bytes(frame.transmit_register));
        }
        series.missing_records = counter.missing();
        series
    }

    pub fn len(&self) -> usize {
        self.record_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_positions.is_empty()
    }

    /// Record positions absent between the first and last frame
    pub fn missing_positions(&self) -> Vec<u64> {
        let mut missing = Vec::new();
        for pair in self.record_positions.windows(2) {
            missing.extend(pair[0] + 1..pair[1]);
        }
        missing
    }

    /// Indices of frames that report a buffer overflow
    pub fn overflow_frames(&self) -> Vec<usize> {
        self.error_flags
            .iter()
            .enumerate()
            .filter(|(_, &flags)| ErrorFlags(flags).buffer_overflow())
            .map(|(index, _)| index)
            .collect()
    }

    /// Write the series as four rows: record positions, error flags, status
    /// flags, transmit register
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let io = |e: std::io::Error| Error::io("<frame status>", e);
        write_row(writer, &self.record_positions).map_err(io)?;
        write_row(writer, &self.error_flags).map_err(io)?;
        write_row(writer, &self.status_flags).map_err(io)?;
        write_row(writer, &self.transmit_register).map_err(io)
    }
}

fn write_row<W, T>(writer: &mut W, values: &[T]) -> std::io::Result<()>
where
    W: Write,
    T: std::fmt::Display,
{
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            writer.write_all(b", ")?;
        }
        write!(writer, "{value}")?;
    }
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Frame> {
        [250u8, 251, 255, 0, 3]
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let mut frame = Frame::blank(record);
                frame.status_flags.0 = index as u8;
                frame.transmit_register = [0x12, index as u8];
                if index == 2 {
                    frame.error_flags.0 = 1;
                }
                frame
            })
            .collect()
    }

    #[test]
    fn test_series_from_frames() {
        let series = FrameStatusSeries::from_frames(&frames());
        assert_eq!(series.len(), 5);
        assert_eq!(series.record_positions, vec![0, 1, 5, 6, 9]);
        assert_eq!(series.status_flags, vec![0, 1, 2, 3, 4]);
        assert_eq!(series.transmit_register[3], 0x1203);
        assert_eq!(series.overflow_frames(), vec![2]);
    }

    #[test]
    fn test_missing_positions() {
        let series = FrameStatusSeries::from_frames(&frames());
        assert_eq!(series.missing_positions(), vec![2, 3, 4, 7, 8]);
        assert_eq!(series.missing_records, 5);
        assert!(FrameStatusSeries::default().missing_positions().is_empty());
    }

    #[test]
    fn test_write_rows() {
        let series = FrameStatusSeries::from_frames(&frames()[..2]);
        let mut out = Vec::new();
        series.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0, 1\n0, 0\n0, 1\n4608, 4609\n"
        );
    }
}
