//! ITF - Itek amplifier recording decoder
//!
//! This library reads `.itf` recordings made by the Itek 128-channel
//! amplifier, splits them into per-channel series, calibrates them to
//! microvolts using the recording's card settings and writes them out as a
//! text table.
//!
//! ## Architecture
//!
//! - **itf-core**: Frame layout, sample conversion, channel mapping and
//!   settings parsing (no I/O)
//! - **itf**: File reading, calibration, export and the `itf2csv` tool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itf::{DecodeOptions, DecodeSession};
//!
//! fn example() -> itf::Result<()> {
//!     let options = DecodeOptions::default().with_strict_alignment(true);
//!     let recording = DecodeSession::run("session.itf", &options)?;
//!
//!     println!(
//!         "{} frames, {} bad",
//!         recording.frame_count(),
//!         recording.bad_frames.len()
//!     );
//!     recording.write_table("session.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: Memory-mapped reads of the frame region
//! - **serde**: JSON decode summaries
//! - **cli**: The `itf2csv` binary

pub use itf_core::{
    // Frame format
    Frame, Packet, ThreeByteSample,
    // Settings
    CardConfig, CardMap, CardSettings, ConfigWarning, ConfigWarningKind,
    // Core errors
    ItfError,
    // Record continuity
    RecordCounter,
};

pub mod channels;
pub mod config_loader;
pub mod dump;
pub mod error;
pub mod export;
pub mod gain;
pub mod options;
pub mod reader;
pub mod session;
pub mod status;
pub mod summary;

pub use channels::{
    extract_channel, extract_channels, ChannelSeries, ChannelSet, DigitalPortSeries,
};
pub use config_loader::{
    companion_paths, find_companion, load_card_config, load_companion, ConfigReport,
};
pub use dump::write_frame_report;
pub use error::{Error, Result};
pub use export::{write_table, write_table_to};
pub use gain::apply_gains;
pub use options::DecodeOptions;
pub use reader::{decode_frames, read_frames, FrameSet};
pub use session::{DecodeSession, DecodedRecording};
pub use status::FrameStatusSeries;
pub use summary::{CardSummary, DecodeSummary};
