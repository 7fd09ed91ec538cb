//! Stream validation for ITF recordings
//!
//! Pure functions over byte buffers: frame alignment, frame counting and
//! the bad-frame limit. No I/O.

pub mod bounds;
pub mod stream;

pub use bounds::{frame_region, frame_windows};
pub use stream::{frame_count, locate_first_frame, locate_first_valid_frame, BadFrameTally};
