use std::ops::RangeInclusive;

/// Source of uniformly distributed integers.
pub trait RandomPort: Send + Sync {
    /// A value in `range`, bounds included. `range` must not be empty.
    fn pick(&self, range: RangeInclusive<u32>) -> u32;
}
