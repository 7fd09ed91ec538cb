//! Conversion from converter codes to microvolts
//!
//! The cards use ADS1278 converters with an input range of -Vref..+Vref,
//! Vref = 2.5 V, mapped onto the 24-bit code range. After dividing out the
//! card gain the result is expressed in microvolts.

use crate::format::constants::calibration::{FULL_SCALE_CODE, MICROVOLTS_PER_VOLT, V_REF};

/// Microvolts per converter code at the given gain
pub fn scale_factor(gain: f64) -> f64 {
    (V_REF * MICROVOLTS_PER_VOLT) / (FULL_SCALE_CODE * gain)
}

/// Convert one converter code to microvolts
pub fn to_microvolts(code: i32, gain: f64) -> f64 {
    scale_factor(gain) * f64::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{SAMPLE_MAX, SAMPLE_MIN};

    #[test]
    fn test_scale_factor_matches_formula() {
        let expected = (2.5 * 1e6) / ((8_388_608.0 - 1.0) * 2000.0);
        assert_eq!(scale_factor(2000.0), expected);
    }

    #[test]
    fn test_full_scale_codes_at_gain_2000() {
        let scale = (2.5 * 1e6) / (8_388_607.0 * 2000.0);
        assert_eq!(to_microvolts(SAMPLE_MAX, 2000.0), scale * 8_388_607.0);
        assert_eq!(to_microvolts(SAMPLE_MIN, 2000.0), scale * -8_388_608.0);
        assert!((to_microvolts(SAMPLE_MAX, 2000.0) - 1250.0).abs() < 1e-9);
        assert!((to_microvolts(SAMPLE_MIN, 2000.0) + 1250.000149).abs() < 1e-6);
    }

    #[test]
    fn test_higher_gain_means_smaller_step() {
        assert!(scale_factor(10000.0) < scale_factor(2000.0));
        assert!(scale_factor(2000.0) < scale_factor(400.0));
    }
}
