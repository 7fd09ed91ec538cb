//! Options controlling a decode run

use itf_core::format::constants::MAX_BAD_FRAMES;
use itf_core::CardMap;
use std::path::PathBuf;

/// Configuration for reading and calibrating a recording
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Bad frames tolerated before the read is abandoned
    pub bad_frame_limit: usize,
    /// Card whose settings apply to each channel block
    pub card_map: CardMap,
    /// Require the first frame to pass the marker check, not just start with `'1'`
    pub strict_alignment: bool,
    /// Convert to microvolts when a card configuration is available
    pub calibrate: bool,
    /// Card configuration to use instead of the `.ita` companion file
    pub config_path: Option<PathBuf>,
    /// Drop channels whose card is switched off in the card settings
    pub enabled_cards_only: bool,
}

impl DecodeOptions {
    /// Set the bad-frame limit
    pub fn with_bad_frame_limit(mut self, limit: usize) -> Self {
        self.bad_frame_limit = limit;
        self
    }

    /// Set the card map
    pub fn with_card_map(mut self, card_map: CardMap) -> Self {
        self.card_map = card_map;
        self
    }

    /// Enable or disable strict first-frame alignment
    pub fn with_strict_alignment(mut self, strict: bool) -> Self {
        self.strict_alignment = strict;
        self
    }

    /// Enable or disable calibration
    pub fn with_calibration(mut self, calibrate: bool) -> Self {
        self.calibrate = calibrate;
        self
    }

    /// Read card settings from an explicit file
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Keep only channels on cards that are switched on
    pub fn with_enabled_cards_only(mut self, enabled_only: bool) -> Self {
        self.enabled_cards_only = enabled_only;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            bad_frame_limit: MAX_BAD_FRAMES,
            card_map: CardMap::identity(),
            strict_alignment: false,
            calibrate: true,
            config_path: None,
            enabled_cards_only: false,
        }
    }
}
