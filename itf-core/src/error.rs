//! Error types for ITF format operations

/// Errors that can occur while decoding ITF data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItfError {
    /// Fewer bytes than one frame
    InsufficientBuffer,
    /// No packet-1 marker in the search window
    NoFrameStart,
    /// Less than one full frame after alignment
    TruncatedFile,
    /// Bad-frame count exceeded the configured limit
    TooManyBadFrames,
    /// Channel index outside 0..128
    InvalidChannel,
    /// Card index outside 0..16
    InvalidCard,
    /// Card map is not a permutation of the card numbers
    InvalidCardMap,
    /// Malformed configuration line
    ConfigParse,
}

impl core::fmt::Display for ItfError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ItfError::InsufficientBuffer => "Insufficient bytes for a data frame",
            ItfError::NoFrameStart => "No frame start found in search window",
            ItfError::TruncatedFile => "Less than one full data frame after alignment",
            ItfError::TooManyBadFrames => "Too many data frames failed the marker check",
            ItfError::InvalidChannel => "Invalid channel number",
            ItfError::InvalidCard => "Invalid card number",
            ItfError::InvalidCardMap => "Card map must list each card exactly once",
            ItfError::ConfigParse => "Malformed card configuration line",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for ItfError {}

/// Result type for ITF format operations
pub type Result<T> = core::result::Result<T, ItfError>;
