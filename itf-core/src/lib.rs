#![cfg_attr(not(test), no_std)]

//! ITF Core - Itek amplifier recording format definitions
//!
//! This crate provides the data frame layout, sample conversion, channel
//! mapping, stream alignment and card configuration parsing for `.itf`
//! recordings. It performs no I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod calibration;
pub mod config;
pub mod error;
pub mod format;
pub mod record;
pub mod validation;

pub use calibration::{scale_factor, to_microvolts};
pub use config::{CardConfig, CardMap, CardSettings, ConfigWarning, ConfigWarningKind};
pub use error::*;
pub use format::*;
pub use record::RecordCounter;
pub use validation::*;

/// Read access to per-frame channel data
pub trait ChannelSource {
    /// Signed converter code for a channel
    fn channel_code(&self, channel: usize) -> Result<i32>;

    /// Parallel port pins captured with the samples
    fn parallel_port(&self) -> u8;
}

impl ChannelSource for Frame {
    fn channel_code(&self, channel: usize) -> Result<i32> {
        Frame::channel_code(self, channel)
    }

    fn parallel_port(&self) -> u8 {
        self.parallel_port
    }
}
