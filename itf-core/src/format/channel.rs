//! Channel to packet mapping
//!
//! Packets carry channels in descending order, so channel 127 is the first
//! sample of packet 1 and channel 0 is the last sample of packet 7.

use super::constants::{layout, CHANNEL_COUNT, CHANNELS_PER_CARD, PACKET_COUNT};
use crate::error::{ItfError, Result};

/// Locate a channel as `(packet index, index within packet)`
///
/// | channels | packet | index |
/// |---|---|---|
/// | 109-127 | 0 | 127 - ch |
/// | 89-108 | 1 | 108 - ch |
/// | 69-88 | 2 | 88 - ch |
/// | 49-68 | 3 | 68 - ch |
/// | 29-48 | 4 | 48 - ch |
/// | 9-28 | 5 | 28 - ch |
/// | 0-8 | 6 | 8 - ch |
pub const fn offset_for(channel: usize) -> Result<(usize, usize)> {
    if channel >= CHANNEL_COUNT {
        return Err(ItfError::InvalidChannel);
    }

    let mut block = 0;
    while block < PACKET_COUNT {
        let first = layout::FIRST_CHANNEL[block];
        let last = first + 1 - layout::SAMPLES_PER_PACKET[block];
        if channel >= last && channel <= first {
            return Ok((block, first - channel));
        }
        block += 1;
    }

    Err(ItfError::InvalidChannel)
}

/// Inverse of [`offset_for`]
pub const fn channel_at(block: usize, index: usize) -> Option<usize> {
    if block >= PACKET_COUNT || index >= layout::SAMPLES_PER_PACKET[block] {
        return None;
    }
    Some(layout::FIRST_CHANNEL[block] - index)
}

/// Physical card serving a channel under the identity card map
pub const fn card_for_channel(channel: usize) -> Result<usize> {
    if channel >= CHANNEL_COUNT {
        return Err(ItfError::InvalidChannel);
    }
    Ok(channel / CHANNELS_PER_CARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_for_block_edges() {
        assert_eq!(offset_for(127), Ok((0, 0)));
        assert_eq!(offset_for(109), Ok((0, 18)));
        assert_eq!(offset_for(108), Ok((1, 0)));
        assert_eq!(offset_for(89), Ok((1, 19)));
        assert_eq!(offset_for(88), Ok((2, 0)));
        assert_eq!(offset_for(69), Ok((2, 19)));
        assert_eq!(offset_for(68), Ok((3, 0)));
        assert_eq!(offset_for(49), Ok((3, 19)));
        assert_eq!(offset_for(48), Ok((4, 0)));
        assert_eq!(offset_for(29), Ok((4, 19)));
        assert_eq!(offset_for(28), Ok((5, 0)));
        assert_eq!(offset_for(9), Ok((5, 19)));
        assert_eq!(offset_for(8), Ok((6, 0)));
        assert_eq!(offset_for(0), Ok((6, 8)));
    }

    #[test]
    fn test_offset_for_rejects_out_of_range() {
        assert_eq!(offset_for(128), Err(ItfError::InvalidChannel));
        assert_eq!(offset_for(usize::MAX), Err(ItfError::InvalidChannel));
    }

    #[test]
    fn test_offset_for_is_a_bijection() {
        let mut seen = [[false; 20]; PACKET_COUNT];
        for channel in 0..CHANNEL_COUNT {
            let (block, index) = offset_for(channel).unwrap();
            assert!(index < layout::SAMPLES_PER_PACKET[block]);
            assert!(!seen[block][index], "slot hit twice by channel {channel}");
            seen[block][index] = true;
            assert_eq!(channel_at(block, index), Some(channel));
        }
        let filled: usize = seen.iter().map(|row| row.iter().filter(|hit| **hit).count()).sum();
        assert_eq!(filled, CHANNEL_COUNT);
    }

    #[test]
    fn test_channel_at_rejects_missing_slots() {
        assert_eq!(channel_at(0, 19), None);
        assert_eq!(channel_at(6, 9), None);
        assert_eq!(channel_at(7, 0), None);
    }

    #[test]
    fn test_card_for_channel() {
        assert_eq!(card_for_channel(0), Ok(0));
        assert_eq!(card_for_channel(7), Ok(0));
        assert_eq!(card_for_channel(8), Ok(1));
        assert_eq!(card_for_channel(127), Ok(15));
        assert_eq!(card_for_channel(128), Err(ItfError::InvalidChannel));
    }
}
