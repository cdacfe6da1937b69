use crate::{uniform_in, BoundedRand, Rand};
use std::ops::RangeInclusive;
use xrand::rngs::OsRng;
use xrand::RngCore;

/// 默认使用OsRng <br>
#[derive(Copy, Clone, Default)]
pub struct DefaultRand {
    rng: OsRng,
}

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}

impl BoundedRand for DefaultRand {
    fn gen_range(&mut self, range: RangeInclusive<u64>) -> u64 {
        uniform_in(self, range)
    }
}
