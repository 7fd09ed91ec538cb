//! Wire format definitions for Itek ITF recordings
//!
//! Pure data structure definitions and decoding for the fixed 400-byte data
//! frame. No I/O.

pub mod channel;
pub mod constants;
pub mod frame;
pub mod sample;

pub use channel::{card_for_channel, channel_at, offset_for};
pub use constants::{CARD_COUNT, CHANNEL_COUNT, CHANNELS_PER_CARD, FRAME_SIZE};
pub use frame::{ErrorFlags, Frame, Packet, StatusFlags};
pub use sample::{sample_to_signed, ThreeByteSample, SAMPLE_MAX, SAMPLE_MIN};
