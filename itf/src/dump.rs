//! Human-readable frame report
//!
//! Prints every header field and the raw bytes of each sample, labelled by
//! channel. Used when a recording is inspected rather than converted.

use crate::error::{Error, Result};
use itf_core::format::constants::layout::FIRST_CHANNEL;
use itf_core::Frame;
use std::io::Write;

/// Write a report of `frames` to `writer`
pub fn write_frame_report<W: Write>(writer: &mut W, frames: &[Frame]) -> Result<()> {
    frames
        .iter()
        .enumerate()
        .try_for_each(|(index, frame)| write_frame(writer, index, frame))
        .map_err(|e| Error::io("<report>", e))
}

fn write_frame<W: Write>(w: &mut W, index: usize, frame: &Frame) -> std::io::Result<()> {
    writeln!(w, "Data Frame {index}:")?;
    writeln!(
        w,
        "    Record: {}  Error flags: 0x{:02X}  Status flags: 0x{:02X}",
        frame.record_number, frame.error_flags.0, frame.status_flags.0
    )?;
    writeln!(
        w,
        "    Parallel port: 0x{:02X}  TR: 0x{:02X} 0x{:02X}",
        frame.parallel_port, frame.transmit_register[0], frame.transmit_register[1]
    )?;

    for (packet, first) in frame.packets.iter().zip(FIRST_CHANNEL) {
        write!(w, "    Packet '{}':", char::from(packet.marker).escape_default())?;
        for (offset, sample) in packet.samples().iter().enumerate() {
            write!(
                w,
                " Ch {}: {:02X} {:02X} {:02X}",
                first - offset,
                sample.msb,
                sample.middle,
                sample.lsb
            )?;
        }
        writeln!(w)?;
    }

    let status = match frame.first_bad_marker() {
        Some(packet) => format!("failed packet {packet} check"),
        None => String::from("ok"),
    };
    writeln!(
        w,
        "    Record check: {}  Terminator: 0x{:02X} 0x{:02X}  ({status})",
        frame.record_number_check, frame.terminator[0], frame.terminator[1]
    )
}
