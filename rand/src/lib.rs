use std::ops::RangeInclusive;

pub trait Rand: Default {
    fn rand(&mut self, random: &mut [u8]);
}

/// provider of integers in a caller given closed range
pub trait BoundedRand {
    fn gen_range(&mut self, range: RangeInclusive<u64>) -> u64;
}

mod default_rand;
pub use default_rand::DefaultRand;

mod fixed_rand;
pub use fixed_rand::FixedRand;

impl<T: xrand::RngCore + Default> Rand for T {
    fn rand(&mut self, random: &mut [u8]) {
        let mut r = Self::default();
        r.fill_bytes(random);
    }
}

/// uniform sample in `range` by rejection sampling over the smallest bit mask covering its width.
///
/// an empty range yields its start.
pub fn uniform_in<R: Rand>(rng: &mut R, range: RangeInclusive<u64>) -> u64 {
    let (low, high) = (*range.start(), *range.end());
    if high <= low {
        return low;
    }

    let span = high - low;
    let mask = u64::MAX >> span.leading_zeros();
    let mut buf = [0u8; 8];
    loop {
        rng.rand(&mut buf);
        let x = u64::from_le_bytes(buf) & mask;
        if x <= span {
            return low + x;
        }
    }
}
