//! Settings for all cards of an amplifier

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::card::{CardConfig, GainSetting, LowPassFilter};
use super::parsing::{parse_card_line, parse_decimal, CardField, ConfigWarningKind};
use crate::error::{ItfError, Result};
use crate::format::constants::CARD_COUNT;

/// A skipped configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: ConfigWarningKind,
}

/// Configuration of all 16 cards
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSettings {
    cards: [CardConfig; CARD_COUNT],
}

impl CardSettings {
    /// Every card unconfigured
    pub const fn new() -> Self {
        Self {
            cards: [CardConfig::UNCONFIGURED; CARD_COUNT],
        }
    }

    pub fn card(&self, card: usize) -> Result<&CardConfig> {
        self.cards.get(card).ok_or(ItfError::InvalidCard)
    }

    pub fn card_mut(&mut self, card: usize) -> Result<&mut CardConfig> {
        self.cards.get_mut(card).ok_or(ItfError::InvalidCard)
    }

    pub fn cards(&self) -> &[CardConfig; CARD_COUNT] {
        &self.cards
    }

    /// Apply one `Card.<n>.<field>=<value>` line
    ///
    /// A gain or filter value that is not a recognised code leaves the
    /// card's earlier value in place and reports the line.
    pub fn apply_line(&mut self, line: &str) -> core::result::Result<(), ConfigWarningKind> {
        let setting = parse_card_line(line)?;
        let card = &mut self.cards[setting.card];

        match setting.field {
            CardField::On => card.on = setting.value == "true",
            CardField::LowPass => {
                let raw = parse_decimal(setting.value).ok_or(ConfigWarningKind::UnrecognizedValue)?;
                card.low_pass = LowPassFilter::from_raw(raw);
            }
            CardField::Gain => {
                let gain = parse_decimal(setting.value)
                    .and_then(GainSetting::from_raw)
                    .ok_or(ConfigWarningKind::UnrecognizedValue)?;
                card.gain_setting = Some(gain);
            }
        }

        Ok(())
    }

    /// Parse a whole `.ita` text, collecting skipped lines
    ///
    /// Blank lines are ignored without a warning.
    #[cfg(feature = "alloc")]
    pub fn parse(text: &str) -> (Self, Vec<ConfigWarning>) {
        let mut settings = Self::new();
        let mut warnings = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if let Err(kind) = settings.apply_line(line) {
                warnings.push(ConfigWarning {
                    line: index + 1,
                    kind,
                });
            }
        }

        (settings, warnings)
    }

    /// True if any card has a configured gain
    pub fn any_configured(&self) -> bool {
        self.cards.iter().any(|card| card.gain_setting.is_some())
    }
}

impl Default for CardSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl core::ops::Index<usize> for CardSettings {
    type Output = CardConfig;

    fn index(&self, card: usize) -> &Self::Output {
        &self.cards[card]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_three_example() {
        let mut settings = CardSettings::new();
        settings.apply_line("Card.3.on=true").unwrap();
        settings.apply_line("Card.3.gain=1").unwrap();
        settings.apply_line("Card.3.lpf=1").unwrap();

        let card = settings.card(3).unwrap();
        assert!(card.on);
        assert_eq!(card.gain(), 10000.0);
        assert_eq!(card.low_pass_hz(), 300.0);

        for (index, other) in settings.cards().iter().enumerate() {
            if index == 3 {
                continue;
            }
            assert!(!other.on);
            assert_eq!(other.gain(), 450.0);
            assert_eq!(other.low_pass_hz(), 100.0);
        }
    }

    #[test]
    fn test_on_requires_true() {
        let mut settings = CardSettings::new();
        settings.apply_line("Card.1.on=true").unwrap();
        assert!(settings[1].on);
        settings.apply_line("Card.1.on=yes").unwrap();
        assert!(!settings[1].on);
    }

    #[test]
    fn test_unrecognised_gain_keeps_previous_value() {
        let mut settings = CardSettings::new();
        assert_eq!(
            settings.apply_line("Card.4.gain=9"),
            Err(ConfigWarningKind::UnrecognizedValue)
        );
        assert_eq!(settings[4].gain(), 450.0);

        settings.apply_line("Card.4.gain=2").unwrap();
        assert_eq!(
            settings.apply_line("Card.4.gain=high"),
            Err(ConfigWarningKind::UnrecognizedValue)
        );
        assert_eq!(settings[4].gain(), 2000.0);
    }

    #[test]
    fn test_later_lines_win() {
        let mut settings = CardSettings::new();
        settings.apply_line("Card.0.gain=0").unwrap();
        settings.apply_line("Card.0.gain=1").unwrap();
        assert_eq!(settings[0].gain(), 10000.0);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_parse_collects_warnings() {
        let text = "Card.0.on=true\n\nAmpType=Itek\nCard.0.gain=2\nCard.20.gain=1\nCard.0.lpf=abc\n";
        let (settings, warnings) = CardSettings::parse(text);
        assert!(settings[0].on);
        assert_eq!(settings[0].gain(), 2000.0);
        assert_eq!(settings[0].low_pass_hz(), 100.0);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning { line: 3, kind: ConfigWarningKind::NotCardSetting },
                ConfigWarning { line: 5, kind: ConfigWarningKind::CardOutOfRange },
                ConfigWarning { line: 6, kind: ConfigWarningKind::UnrecognizedValue },
            ]
        );
        assert!(settings.any_configured());
        assert!(!CardSettings::new().any_configured());
    }

    #[test]
    fn test_card_lookup_bounds() {
        let settings = CardSettings::default();
        assert!(settings.card(15).is_ok());
        assert_eq!(settings.card(16).err(), Some(ItfError::InvalidCard));
    }
}
