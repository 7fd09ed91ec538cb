//! Microvolt calibration of extracted channels

use crate::channels::ChannelSeries;
use crate::error::Result;
use itf_core::{CardMap, CardSettings};
use rayon::prelude::*;
use tracing::{debug, info};

/// Rescale every channel in place by the gain of the card that owns it
///
/// Channel block `b` (channels `8b..8b+8`) takes its settings from card
/// `card_map.card_for_block(b)`.
pub fn apply_gains(
    channels: &mut [ChannelSeries],
    cards: &CardSettings,
    card_map: &CardMap,
) -> Result<()> {
    for (card, config) in cards.cards().iter().enumerate() {
        info!(
            "Card {card}: on={} lpf={} Hz gain={}",
            config.on,
            config.low_pass_hz(),
            config.gain()
        );
    }

    let factors = channels
        .iter()
        .map(|series| -> Result<f64> {
            let card = card_map.card_for_channel(series.channel)?;
            Ok(cards.card(card)?.scale_factor())
        })
        .collect::<Result<Vec<f64>>>()?;

    channels
        .par_iter_mut()
        .zip(factors.par_iter())
        .for_each(|(series, &factor)| {
            series.samples.iter_mut().for_each(|sample| *sample *= factor);
        });

    debug!("Calibrated {} channels", channels.len());
    Ok(())
}
