//! Card configuration from the `.ita` companion file
//!
//! Parsing only; reading the file is left to the I/O crate.

pub mod card;
pub mod card_map;
pub mod parsing;
pub mod settings;

pub use card::{CardConfig, GainSetting, LowPassFilter};
pub use card_map::CardMap;
pub use parsing::{parse_card_line, CardField, CardLine, ConfigWarningKind};
pub use settings::{CardSettings, ConfigWarning};
