use crate::BoundedRand;
use std::ops::RangeInclusive;

/// replays a fixed list of values in order, starting over after the last one.
///
/// the values are returned as is, even if they are outside the requested range; checking
/// the draw is left to the caller.
#[derive(Clone, Debug, Default)]
pub struct FixedRand {
    values: Vec<u64>,
    idx: usize,
}

impl FixedRand {
    pub fn new(value: u64) -> Self {
        Self::from_values(vec![value])
    }

    pub fn from_values(values: Vec<u64>) -> Self {
        Self { values, idx: 0 }
    }
}

impl BoundedRand for FixedRand {
    fn gen_range(&mut self, range: RangeInclusive<u64>) -> u64 {
        if self.values.is_empty() {
            log::warn!("fixed rand without values, fallback to the range start");
            return *range.start();
        }

        let x = self.values[self.idx % self.values.len()];
        self.idx = (self.idx + 1) % self.values.len();
        log::trace!("fixed rand replay {x} for range {:?}", range);
        x
    }
}

#[cfg(test)]
mod tests {
    use super::FixedRand;
    use crate::BoundedRand;

    #[test]
    fn replay_in_order() {
        let mut rng = FixedRand::from_values(vec![50, 21, 79]);
        let out: Vec<u64> = (0..7).map(|_| rng.gen_range(20..=80)).collect();
        assert_eq!(out, vec![50, 21, 79, 50, 21, 79, 50]);
    }

    #[test]
    fn single_and_empty() {
        let mut rng = FixedRand::new(50);
        assert_eq!(rng.gen_range(0..=10), 50);
        assert_eq!(rng.gen_range(0..=10), 50);

        let mut rng = FixedRand::default();
        assert_eq!(rng.gen_range(20..=80), 20);
    }
}
