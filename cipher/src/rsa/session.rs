use crate::{BoundedRand, CipherError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// the symmetric key protected by RSA during the exchange
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKey(BigUint);

/// $session\_key^e \mod n$, what travels over the wire
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherValue(BigUint);

/// $cipher^d \mod n$
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredKey(BigUint);

impl SessionKey {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// draw a session key from `range` with the injected provider.
    pub fn generate<R: BoundedRand + ?Sized>(
        rng: &mut R,
        range: RangeInclusive<u64>,
    ) -> Result<Self, CipherError> {
        let (low, high) = (*range.start(), *range.end());
        if range.is_empty() {
            return Err(CipherError::InvalidSessionRange { low, high });
        }

        let value = rng.gen_range(range);
        if value < low || value > high {
            return Err(CipherError::SessionKeyOutOfRange { value, low, high });
        }

        log::debug!("session key {value} drawn from [{low}, {high}]");
        Ok(Self(BigUint::from(value)))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for SessionKey {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl CipherValue {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl RecoveredKey {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn matches(&self, key: &SessionKey) -> bool {
        self.0 == key.0
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Display for CipherValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Display for RecoveredKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionKey;
    use crate::{CipherError, DefaultRand, FixedRand};
    use num_bigint::BigUint;

    #[test]
    fn generate_with_fixed_rand() {
        let mut rng = FixedRand::from_values(vec![50, 20, 80]);
        for expect in [50u32, 20, 80, 50] {
            let key = SessionKey::generate(&mut rng, 20..=80).unwrap();
            assert_eq!(key.value(), &BigUint::from(expect));
        }
    }

    #[test]
    fn generate_with_default_rand() {
        let mut rng = DefaultRand::default();
        let (low, high) = (BigUint::from(20u32), BigUint::from(80u32));
        for _ in 0..256 {
            let key = SessionKey::generate(&mut rng, 20..=80).unwrap();
            assert!(key.value() >= &low && key.value() <= &high);
        }
    }

    #[test]
    fn draw_out_of_range() {
        let mut rng = FixedRand::new(81);
        let err = SessionKey::generate(&mut rng, 20..=80).unwrap_err();
        assert!(matches!(
            err,
            CipherError::SessionKeyOutOfRange {
                value: 81,
                low: 20,
                high: 80
            }
        ));
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_range() {
        let mut rng = FixedRand::new(50);
        let err = SessionKey::generate(&mut rng, 80..=20).unwrap_err();
        assert!(matches!(
            err,
            CipherError::InvalidSessionRange { low: 80, high: 20 }
        ));
    }
}
