//! Error types for reading, calibrating and exporting recordings

use itf_core::ItfError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the decode pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// File could not be opened, read or written
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frame format violation
    #[error("{0}")]
    Format(#[from] ItfError),

    /// Fewer bytes came back than the file length promised
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes delivered
        actual: usize,
    },

    /// More frames failed the marker check than allowed
    #[error("{bad} data frames failed the marker check (limit {limit})")]
    TooManyBadFrames {
        /// Bad frames seen when the read was abandoned
        bad: usize,
        /// Configured limit
        limit: usize,
    },

    /// Buffer for the recording could not be reserved
    #[error("Failed to allocate {bytes} bytes")]
    AllocationFailure {
        /// Size of the failed reservation
        bytes: u64,
    },

    /// No companion configuration file was found
    #[error("No card configuration found for '{}'", .0.display())]
    ConfigMissing(PathBuf),

    /// Summary could not be serialized
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Series handed to the exporter differ in length
    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    LengthMismatch {
        /// Offending row (128 is the parallel port row)
        channel: usize,
        /// Length of channel 0
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
