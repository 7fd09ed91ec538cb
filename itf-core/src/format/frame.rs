//! Itek data frame definition and decoding
//!
//! A frame is one sampling instant across all 128 channels, sent by the
//! amplifier every 2.048 ms. It is made of seven packets of unequal length,
//! each opened by the ASCII digit of its ordinal:
//!
//! - packet 1: status block (record number, flags, parallel port, transmit
//!   register) then channels 127 down to 109
//! - packets 2-6: twenty channels each, 108 down to 9
//! - packet 7: channels 8 down to 0, a repeat of the record number and the
//!   terminator `0x55 0xAA`
//!
//! Fields are read at explicit byte offsets, so decoding never depends on
//! in-memory struct layout.

use super::channel::{channel_at, offset_for};
use super::constants::{layout, FRAME_SIZE, FRAME_TERMINATOR, PACKET_COUNT, SAMPLE_SIZE};
use super::sample::ThreeByteSample;
use crate::error::{ItfError, Result};

/// Error flag byte; only bit 0 is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorFlags(pub u8);

impl ErrorFlags {
    pub const BUFFER_OVERFLOW: u8 = 1 << 0;

    pub const fn buffer_overflow(self) -> bool {
        self.0 & Self::BUFFER_OVERFLOW != 0
    }
}

/// Amplifier status flag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags(pub u8);

impl StatusFlags {
    pub const PRK_LSB: u8 = 1 << 0;
    pub const PRK_MSB: u8 = 1 << 1;
    pub const PFOSD: u8 = 1 << 2;
    pub const BRK_LSB: u8 = 1 << 3;
    pub const BRK_MSB: u8 = 1 << 4;
    pub const BFOSD: u8 = 1 << 5;

    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

/// One packet of samples: its marker byte and up to 20 samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    /// Marker byte as read; should be `'1'..='7'`
    pub marker: u8,
    samples: [ThreeByteSample; 20],
    len: u8,
}

impl Packet {
    /// Samples in wire order (highest channel first)
    pub fn samples(&self) -> &[ThreeByteSample] {
        &self.samples[..self.len as usize]
    }

    /// Number of samples in the packet
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A decoded 400-byte data frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Record number, wraps at 256
    pub record_number: u8,
    pub error_flags: ErrorFlags,
    pub status_flags: StatusFlags,
    /// Snapshot of the parallel (digital) port pins
    pub parallel_port: u8,
    /// Transmit register as (msb, lsb)
    pub transmit_register: [u8; 2],
    /// The seven packets in wire order
    pub packets: [Packet; PACKET_COUNT],
    /// Repeat of the record number at the end of packet 7
    pub record_number_check: u8,
    /// Should be `0x55 0xAA`
    pub terminator: [u8; 2],
}

impl Frame {
    /// Size of a frame in bytes
    pub const SIZE: usize = FRAME_SIZE;

    /// Decode a frame from the first [`FRAME_SIZE`] bytes of `bytes`
    ///
    /// Decoding never fails on content; use [`Frame::validate`] to check the
    /// packet markers.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FRAME_SIZE {
            return Err(ItfError::InsufficientBuffer);
        }

        let mut packets = [Packet {
            marker: 0,
            samples: [ThreeByteSample::default(); 20],
            len: 0,
        }; PACKET_COUNT];

        for (index, packet) in packets.iter_mut().enumerate() {
            packet.marker = bytes[layout::MARKER_OFFSETS[index]];
            let len = layout::SAMPLES_PER_PACKET[index];
            let start = layout::SAMPLE_OFFSETS[index];
            for (slot, sample) in packet.samples[..len].iter_mut().enumerate() {
                let at = start + slot * SAMPLE_SIZE;
                *sample = ThreeByteSample::from_bytes([bytes[at], bytes[at + 1], bytes[at + 2]]);
            }
            packet.len = len as u8;
        }

        Ok(Self {
            record_number: bytes[layout::RECORD_NUMBER],
            error_flags: ErrorFlags(bytes[layout::ERROR_FLAGS]),
            status_flags: StatusFlags(bytes[layout::STATUS_FLAGS]),
            parallel_port: bytes[layout::PARALLEL_PORT],
            transmit_register: [
                bytes[layout::TRANSMIT_REGISTER],
                bytes[layout::TRANSMIT_REGISTER + 1],
            ],
            packets,
            record_number_check: bytes[layout::RECORD_NUMBER_CHECK],
            terminator: [bytes[layout::TERMINATOR], bytes[layout::TERMINATOR + 1]],
        })
    }

    /// Encode the frame back into its wire layout
    pub fn to_bytes(&self) -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[layout::RECORD_NUMBER] = self.record_number;
        bytes[layout::ERROR_FLAGS] = self.error_flags.0;
        bytes[layout::STATUS_FLAGS] = self.status_flags.0;
        bytes[layout::PARALLEL_PORT] = self.parallel_port;
        bytes[layout::TRANSMIT_REGISTER..layout::TRANSMIT_REGISTER + 2]
            .copy_from_slice(&self.transmit_register);

        for (index, packet) in self.packets.iter().enumerate() {
            bytes[layout::MARKER_OFFSETS[index]] = packet.marker;
            let start = layout::SAMPLE_OFFSETS[index];
            for (slot, sample) in packet.samples().iter().enumerate() {
                let at = start + slot * SAMPLE_SIZE;
                bytes[at..at + SAMPLE_SIZE].copy_from_slice(&sample.to_bytes());
            }
        }

        bytes[layout::RECORD_NUMBER_CHECK] = self.record_number_check;
        bytes[layout::TERMINATOR..layout::TERMINATOR + 2].copy_from_slice(&self.terminator);
        bytes
    }

    /// A well-formed frame with every sample zero
    pub fn blank(record_number: u8) -> Self {
        let mut packets = [Packet {
            marker: 0,
            samples: [ThreeByteSample::default(); 20],
            len: 0,
        }; PACKET_COUNT];
        for (index, packet) in packets.iter_mut().enumerate() {
            packet.marker = layout::marker(index);
            packet.len = layout::SAMPLES_PER_PACKET[index] as u8;
        }

        Self {
            record_number,
            error_flags: ErrorFlags::default(),
            status_flags: StatusFlags::default(),
            parallel_port: 0,
            transmit_register: [0; 2],
            packets,
            record_number_check: record_number,
            terminator: FRAME_TERMINATOR,
        }
    }

    /// True iff all seven packet markers hold their expected digit
    ///
    /// The terminator and record number copy are not consulted.
    pub fn validate(&self) -> bool {
        self.first_bad_marker().is_none()
    }

    /// Number (1-7) of the first packet whose marker is wrong
    pub fn first_bad_marker(&self) -> Option<u8> {
        self.packets
            .iter()
            .enumerate()
            .find(|(index, packet)| packet.marker != layout::marker(*index))
            .map(|(index, _)| index as u8 + 1)
    }

    /// Markers, terminator and record number copy all check out
    pub fn is_well_formed(&self) -> bool {
        self.validate()
            && self.terminator == FRAME_TERMINATOR
            && self.record_number == self.record_number_check
    }

    /// Raw sample for a channel
    pub fn sample(&self, channel: usize) -> Result<ThreeByteSample> {
        let (block, index) = offset_for(channel)?;
        Ok(self.packets[block].samples[index])
    }

    /// Signed converter code for a channel
    pub fn channel_code(&self, channel: usize) -> Result<i32> {
        self.sample(channel).map(ThreeByteSample::code)
    }

    /// Overwrite the sample for a channel
    pub fn set_channel_code(&mut self, channel: usize, code: i32) -> Result<()> {
        let (block, index) = offset_for(channel)?;
        self.packets[block].samples[index] = ThreeByteSample::from_code(code);
        Ok(())
    }

    /// Iterate `(channel, sample)` pairs in wire order
    pub fn samples(&self) -> impl Iterator<Item = (usize, ThreeByteSample)> + '_ {
        self.packets.iter().enumerate().flat_map(|(block, packet)| {
            packet.samples().iter().enumerate().filter_map(move |(index, sample)| {
                channel_at(block, index).map(|channel| (channel, *sample))
            })
        })
    }
}
