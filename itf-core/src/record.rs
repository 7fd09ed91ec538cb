//! Record number continuity
//!
//! The amplifier has no buffering, so frames the recorder missed are simply
//! gone. The 8-bit record number in each frame lets gaps be detected. Gaps
//! longer than 255 frames cannot be told apart from shorter ones.

/// Unwraps successive 8-bit record numbers and counts skipped records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounter {
    last: Option<u8>,
    position: u64,
    missing: u64,
}

impl RecordCounter {
    pub const fn new() -> Self {
        Self {
            last: None,
            position: 0,
            missing: 0,
        }
    }

    /// Feed the next record number; returns its unwrapped position
    ///
    /// The first record sits at position 0. A repeated number counts as a
    /// step of zero.
    pub fn observe(&mut self, record_number: u8) -> u64 {
        if let Some(last) = self.last {
            let step = u64::from(record_number.wrapping_sub(last));
            if step > 1 {
                self.missing += step - 1;
            }
            self.position += step;
        }
        self.last = Some(record_number);
        self.position
    }

    /// Records skipped so far
    pub const fn missing(&self) -> u64 {
        self.missing
    }

    /// Unwrapped position of the latest record
    pub const fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_records() {
        let mut counter = RecordCounter::new();
        for (expected, record) in (10u8..20).enumerate() {
            assert_eq!(counter.observe(record), expected as u64);
        }
        assert_eq!(counter.missing(), 0);
    }

    #[test]
    fn test_wraps_at_256() {
        let mut counter = RecordCounter::new();
        counter.observe(254);
        counter.observe(255);
        assert_eq!(counter.observe(0), 2);
        assert_eq!(counter.observe(1), 3);
        assert_eq!(counter.missing(), 0);
    }

    #[test]
    fn test_counts_gaps_across_wrap() {
        let mut counter = RecordCounter::new();
        counter.observe(3);
        counter.observe(6);
        assert_eq!(counter.missing(), 2);
        counter.observe(250);
        counter.observe(2);
        assert_eq!(counter.missing(), 2 + 243 + 7);
        assert_eq!(counter.position(), 3 + 244 + 8);
    }
}
