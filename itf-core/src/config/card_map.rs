//! Assignment of cards to channel blocks
//!
//! Some amplifiers are cabled so that card numbers do not line up with
//! channel blocks. A card map names, for each block of 8 channels, the card
//! whose settings apply to it.

use crate::error::{ItfError, Result};
use crate::format::constants::{CARD_COUNT, CHANNEL_COUNT, CHANNELS_PER_CARD};

/// Card number for each channel block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardMap([u8; CARD_COUNT]);

impl CardMap {
    /// Block `b` is served by card `b`
    pub const fn identity() -> Self {
        let mut cards = [0u8; CARD_COUNT];
        let mut block = 0;
        while block < CARD_COUNT {
            cards[block] = block as u8;
            block += 1;
        }
        Self(cards)
    }

    /// Build from an explicit list; must be a permutation of `0..16`
    pub fn new(cards: [u8; CARD_COUNT]) -> Result<Self> {
        let mut seen = [false; CARD_COUNT];
        for &card in &cards {
            let slot = seen.get_mut(card as usize).ok_or(ItfError::InvalidCardMap)?;
            if *slot {
                return Err(ItfError::InvalidCardMap);
            }
            *slot = true;
        }
        Ok(Self(cards))
    }

    /// Parse a comma-separated list such as `1,0,2,3,4,5,6,7,8,9,10,11,12,13,14,15`
    pub fn parse(list: &str) -> Result<Self> {
        let mut cards = [0u8; CARD_COUNT];
        let mut count = 0;
        for part in list.split(',') {
            if count >= CARD_COUNT {
                return Err(ItfError::InvalidCardMap);
            }
            cards[count] = part.trim().parse().map_err(|_| ItfError::InvalidCardMap)?;
            count += 1;
        }
        if count != CARD_COUNT {
            return Err(ItfError::InvalidCardMap);
        }
        Self::new(cards)
    }

    pub const fn card_for_block(&self, block: usize) -> usize {
        self.0[block] as usize
    }

    /// Card whose settings apply to a channel
    pub fn card_for_channel(&self, channel: usize) -> Result<usize> {
        if channel >= CHANNEL_COUNT {
            return Err(ItfError::InvalidChannel);
        }
        Ok(self.card_for_block(channel / CHANNELS_PER_CARD))
    }

    pub const fn is_identity(&self) -> bool {
        let mut block = 0;
        while block < CARD_COUNT {
            if self.0[block] as usize != block {
                return false;
            }
            block += 1;
        }
        true
    }

    pub fn as_array(&self) -> &[u8; CARD_COUNT] {
        &self.0
    }
}

impl Default for CardMap {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let map = CardMap::default();
        assert!(map.is_identity());
        assert_eq!(map.card_for_channel(0), Ok(0));
        assert_eq!(map.card_for_channel(9), Ok(1));
        assert_eq!(map.card_for_channel(127), Ok(15));
        assert_eq!(map.card_for_channel(128), Err(ItfError::InvalidChannel));
    }

    #[test]
    fn test_parse_swapped_cards() {
        let map = CardMap::parse("1,0,2,3,4,5,6,7,8,9,10,11,12,13,14,15").unwrap();
        assert!(!map.is_identity());
        assert_eq!(map.card_for_channel(3), Ok(1));
        assert_eq!(map.card_for_channel(12), Ok(0));
        assert_eq!(map.card_for_channel(20), Ok(2));
    }

    #[test]
    fn test_parse_rejects_bad_lists() {
        assert_eq!(CardMap::parse("0,1,2"), Err(ItfError::InvalidCardMap));
        assert_eq!(
            CardMap::parse("0,0,2,3,4,5,6,7,8,9,10,11,12,13,14,15"),
            Err(ItfError::InvalidCardMap)
        );
        assert_eq!(
            CardMap::parse("0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,16"),
            Err(ItfError::InvalidCardMap)
        );
        assert_eq!(
            CardMap::parse("0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,0"),
            Err(ItfError::InvalidCardMap)
        );
        assert_eq!(CardMap::parse("a,b"), Err(ItfError::InvalidCardMap));
    }
}
