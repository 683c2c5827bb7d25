use std::ops::RangeInclusive;

use rand::Rng;

use qv_core::ports::RandomPort;

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomPort for ThreadRandom {
    fn pick(&self, range: RangeInclusive<u32>) -> u32 {
        if range.is_empty() {
            return *range.start();
        }
        rand::rng().random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_in_range_and_include_bounds() {
        let random = ThreadRandom;
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let value = random.pick(5..=8);
            assert!((5..=8).contains(&value));
            seen[(value - 5) as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn single_value_range() {
        assert_eq!(ThreadRandom.pick(7..=7), 7);
    }
}
