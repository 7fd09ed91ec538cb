//! Line parser for the `.ita` card settings file
//!
//! The file holds one setting per line:
//!
//! ```text
//! Card.0.on=true
//! Card.0.lpf=0
//! Card.0.gain=2
//! ```

use crate::format::constants::CARD_COUNT;

/// Why a configuration line was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigWarningKind {
    /// Line does not start with `Card.`
    NotCardSetting,
    /// No `=` or nothing after it
    MissingValue,
    /// Card number is not a decimal integer
    BadCardNumber,
    /// Card number outside 0..16
    CardOutOfRange,
    /// Field other than `on`, `lpf` or `gain`
    UnknownField,
    /// Value is not a recognised code for the field
    UnrecognizedValue,
}

impl core::fmt::Display for ConfigWarningKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConfigWarningKind::NotCardSetting => "unexpected line",
            ConfigWarningKind::MissingValue => "missing value",
            ConfigWarningKind::BadCardNumber => "unparseable card number",
            ConfigWarningKind::CardOutOfRange => "card number out of range",
            ConfigWarningKind::UnknownField => "unknown setting",
            ConfigWarningKind::UnrecognizedValue => "unrecognised value",
        };
        write!(f, "{msg}")
    }
}

/// Setting named by a configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    On,
    LowPass,
    Gain,
}

impl CardField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "on" => Some(CardField::On),
            "lpf" => Some(CardField::LowPass),
            "gain" => Some(CardField::Gain),
            _ => None,
        }
    }
}

/// A syntactically valid `Card.<n>.<field>=<value>` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLine<'a> {
    pub card: usize,
    pub field: CardField,
    pub value: &'a str,
}

/// Split a line into card, field and value
///
/// Surrounding whitespace is ignored.
pub fn parse_card_line(line: &str) -> Result<CardLine<'_>, ConfigWarningKind> {
    let line = line.trim();
    let rest = line
        .strip_prefix("Card.")
        .ok_or(ConfigWarningKind::NotCardSetting)?;

    let (key, value) = rest.split_once('=').ok_or(ConfigWarningKind::MissingValue)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigWarningKind::MissingValue);
    }

    let (card_str, field_str) = key.split_once('.').ok_or(ConfigWarningKind::UnknownField)?;
    let card = parse_decimal(card_str).ok_or(ConfigWarningKind::BadCardNumber)?;
    if card >= CARD_COUNT as i64 || card < 0 {
        return Err(ConfigWarningKind::CardOutOfRange);
    }
    let field = CardField::from_key(field_str.trim()).ok_or(ConfigWarningKind::UnknownField)?;

    Ok(CardLine {
        card: card as usize,
        field,
        value,
    })
}

/// Parse an optionally signed decimal integer, ignoring surrounding space
pub(crate) fn parse_decimal(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}
