//! Remaining-character counters for length-limited fields.
//!
//! A limited field never blocks typing. It reports how many characters are
//! left (negative once the limit is exceeded) and a tier the UI turns into a
//! colour.

/// Remaining count at or below which the three-tier counter warns.
pub const NEAR_LIMIT_THRESHOLD: i64 = 2;

/// Which colour tiers a counter distinguishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LimitTiers {
    /// Over-limit, near-limit and normal.
    #[default]
    ThreeTier,
    /// Over-limit and normal only. Kept for screens built before the
    /// near-limit warning existed.
    TwoTier,
}

/// Display tier of a remaining-character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTier {
    Normal,
    NearLimit,
    OverLimit,
}

impl CounterTier {
    /// Whether the field border should be highlighted as an error.
    pub fn highlights_border(self) -> bool {
        self == CounterTier::OverLimit
    }
}

/// Counter value and tier for a limited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    /// `max_length - length`; negative when over the limit.
    pub remaining: i64,
    pub tier: CounterTier,
}

/// Counter for a text of `length` characters under `max_length`.
pub fn counter(max_length: usize, length: usize, tiers: LimitTiers) -> CounterState {
    let remaining = to_i64(max_length) - to_i64(length);
    let tier = if remaining < 0 {
        CounterTier::OverLimit
    } else if tiers == LimitTiers::ThreeTier && remaining <= NEAR_LIMIT_THRESHOLD {
        CounterTier::NearLimit
    } else {
        CounterTier::Normal
    };
    CounterState { remaining, tier }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
