//! Trigger scanning (line pre-classification).
//!
//! Every loose check contains the keyword `dc` followed by digits, so a line
//! lacking either can be skipped before any trie lookup. This is a heuristic:
//! false positives are fine because the grammar still has to match.

bitflags::bitflags! {
    /// Coarse buckets for fast line classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u8 {
        const HAS_DIGITS = 1 << 0;
        const HAS_DC     = 1 << 1;
    }
}

/// Buckets detected on one line of input.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    pub fn scan(line: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let bytes = line.as_bytes();

        if bytes.iter().any(u8::is_ascii_digit) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        if bytes.windows(2).any(|w| w[0].eq_ignore_ascii_case(&b'd') && w[1].eq_ignore_ascii_case(&b'c')) {
            buckets |= BucketMask::HAS_DC;
        }

        TriggerInfo { buckets }
    }

    /// Whether a loose check could possibly start somewhere on this line.
    pub fn may_hold_loose_check(&self) -> bool {
        self.buckets.contains(BucketMask::HAS_DIGITS | BucketMask::HAS_DC)
    }
}
