//! Frame alignment within a raw byte stream
//!
//! Recordings may open with a few hundred bytes of partial-frame garbage.
//! The first frame is found by looking for the packet-1 marker. This is a
//! heuristic: garbage that happens to contain `'1'` gives a false start,
//! which [`locate_first_valid_frame`] guards against by also checking the
//! remaining markers, terminator and record copy of the candidate frame.

use crate::error::{ItfError, Result};
use crate::format::constants::{layout, FRAME_SEARCH_WINDOW, FRAME_SIZE, MAX_BAD_FRAMES};
use crate::format::Frame;

/// Offset of the first packet-1 marker within the search window
pub fn locate_first_frame(buffer: &[u8]) -> Result<usize> {
    let window = &buffer[..buffer.len().min(FRAME_SEARCH_WINDOW)];
    window
        .iter()
        .position(|&byte| byte == layout::marker(0))
        .ok_or(ItfError::NoFrameStart)
}

/// Offset of the first packet-1 marker that opens a frame passing
/// [`Frame::is_well_formed`]
pub fn locate_first_valid_frame(buffer: &[u8]) -> Result<usize> {
    let window_end = buffer.len().min(FRAME_SEARCH_WINDOW);
    (0..window_end)
        .filter(|&offset| buffer[offset] == layout::marker(0))
        .find(|&offset| {
            Frame::decode(&buffer[offset..])
                .map(|frame| frame.is_well_formed())
                .unwrap_or(false)
        })
        .ok_or(ItfError::NoFrameStart)
}

/// Whole frames in `byte_len` bytes after alignment
pub const fn frame_count(byte_len: usize) -> Result<usize> {
    let count = byte_len / FRAME_SIZE;
    if count == 0 {
        return Err(ItfError::TruncatedFile);
    }
    Ok(count)
}

/// Running count of frames that failed the marker check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadFrameTally {
    count: usize,
    limit: usize,
}

impl BadFrameTally {
    pub const fn new(limit: usize) -> Self {
        Self { count: 0, limit }
    }

    /// Record one frame's check result
    ///
    /// Fails once more than `limit` frames have been bad.
    pub fn record(&mut self, valid: bool) -> Result<()> {
        if !valid {
            self.count += 1;
            if self.count > self.limit {
                return Err(ItfError::TooManyBadFrames);
            }
        }
        Ok(())
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for BadFrameTally {
    fn default() -> Self {
        Self::new(MAX_BAD_FRAMES)
    }
}
