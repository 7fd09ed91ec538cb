//! Format constants for the Itek data frame and amplifier hardware

/// Size of one data frame in bytes
pub const FRAME_SIZE: usize = 400;

/// Bytes per packed sample
pub const SAMPLE_SIZE: usize = 3;

/// Number of marker-delimited packets in a frame
pub const PACKET_COUNT: usize = 7;

/// Number of logical channels carried by every frame
pub const CHANNEL_COUNT: usize = 128;

/// Number of amplifier cards
pub const CARD_COUNT: usize = 16;

/// Channels served by one card
pub const CHANNELS_PER_CARD: usize = CHANNEL_COUNT / CARD_COUNT;

/// Bytes scanned for the first packet-1 marker
pub const FRAME_SEARCH_WINDOW: usize = FRAME_SIZE;

/// Bad frames tolerated before a read is abandoned
pub const MAX_BAD_FRAMES: usize = 1000;

/// Frame terminator bytes
pub const FRAME_TERMINATOR: [u8; 2] = [0x55, 0xAA];

/// Milliseconds between frames
pub const FRAME_PERIOD_MS: f64 = 2.048;

/// Sampling rate of every channel
pub const SAMPLES_PER_SECOND: f64 = 1000.0 / FRAME_PERIOD_MS;

/// Packet layout within a frame
pub mod layout {
    use super::PACKET_COUNT;

    /// Offset of the record number
    pub const RECORD_NUMBER: usize = 1;
    /// Offset of the error flag byte
    pub const ERROR_FLAGS: usize = 2;
    /// Offset of the status flag byte
    pub const STATUS_FLAGS: usize = 3;
    /// Offset of the parallel port snapshot
    pub const PARALLEL_PORT: usize = 4;
    /// Offset of the two transmit register bytes
    pub const TRANSMIT_REGISTER: usize = 5;
    /// Offset of the record number copy
    pub const RECORD_NUMBER_CHECK: usize = 397;
    /// Offset of the two terminator bytes
    pub const TERMINATOR: usize = 398;

    /// Offset of each packet's marker byte
    pub const MARKER_OFFSETS: [usize; PACKET_COUNT] = [0, 64, 125, 186, 247, 308, 369];

    /// Offset of the first sample byte of each packet
    pub const SAMPLE_OFFSETS: [usize; PACKET_COUNT] = [7, 65, 126, 187, 248, 309, 370];

    /// Samples carried by each packet
    pub const SAMPLES_PER_PACKET: [usize; PACKET_COUNT] = [19, 20, 20, 20, 20, 20, 9];

    /// Highest channel carried by each packet (channels run downward)
    pub const FIRST_CHANNEL: [usize; PACKET_COUNT] = [127, 108, 88, 68, 48, 28, 8];

    /// Expected marker byte for a packet
    pub const fn marker(packet: usize) -> u8 {
        b'1' + packet as u8
    }
}

/// Calibration constants for the ADS1278 converters on each card
pub mod calibration {
    /// Converter reference voltage
    pub const V_REF: f64 = 2.5;
    /// Largest positive converter code, 2^23 - 1
    pub const FULL_SCALE_CODE: f64 = 8_388_607.0;
    /// Volts to microvolts
    pub const MICROVOLTS_PER_VOLT: f64 = 1.0e6;
    /// Gain of a card never mentioned in the configuration
    pub const UNCONFIGURED_GAIN: f64 = 450.0;
    /// Default low-pass filter cutoff in Hz
    pub const DEFAULT_LOW_PASS_HZ: f64 = 100.0;
}
