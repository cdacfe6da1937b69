use std::ops::RangeInclusive;

use cipher::rsa::{recover_with_known_factors, CipherValue, KeyMaterial, Recovery, SessionKey};
use cipher::{BoundedRand, CipherError};
use num_bigint::BigUint;

use crate::cmd::DemoConfig;

/// inputs of one demo run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoParams {
    pub p: u64,
    pub q: u64,
    pub e: u64,
    pub session_range: RangeInclusive<u64>,
}

/// the values of one key exchange, computed once and kept for the whole run
#[derive(Clone, Debug)]
pub struct DemoSession {
    key: KeyMaterial,
    session: SessionKey,
    cipher: CipherValue,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self::from(&DemoConfig::default())
    }
}

impl From<&DemoConfig> for DemoParams {
    fn from(c: &DemoConfig) -> Self {
        Self {
            p: c.p,
            q: c.q,
            e: c.e,
            session_range: c.session_range(),
        }
    }
}

impl DemoParams {
    pub fn key_material(&self) -> Result<KeyMaterial, CipherError> {
        KeyMaterial::setup(
            BigUint::from(self.p),
            BigUint::from(self.q),
            BigUint::from(self.e),
        )
    }
}

impl DemoSession {
    /// key setup, session key draw, then encryption of the session key
    pub fn start<R: BoundedRand + ?Sized>(
        params: &DemoParams,
        rng: &mut R,
    ) -> Result<Self, CipherError> {
        let key = params.key_material()?;
        let session = SessionKey::generate(rng, params.session_range.clone())?;
        let cipher = key.encrypt(&session)?;
        log::debug!("session key {session} encrypted to {cipher}");

        Ok(Self {
            key,
            session,
            cipher,
        })
    }

    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.session
    }

    pub fn cipher(&self) -> &CipherValue {
        &self.cipher
    }

    /// the "run Shor's algorithm" trigger.
    ///
    /// only the public key and the captured cipher are used, together with the factors that the
    /// simulated quantum computer is assumed to have found.
    pub fn run_attack(&self) -> Result<Recovery, CipherError> {
        recover_with_known_factors(
            self.key.p(),
            self.key.q(),
            &self.key.public_key(),
            &self.cipher,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoParams, DemoSession};
    use cipher::{CipherError, DefaultRand, FixedRand};
    use num_bigint::BigUint;

    #[test]
    fn demo_session_with_fixed_key() {
        let params = DemoParams::default();
        let s = DemoSession::start(&params, &mut FixedRand::new(50)).unwrap();
        assert_eq!(s.key().modulus(), &BigUint::from(391u32));
        assert_eq!(s.session_key().value(), &BigUint::from(50u32));
        assert_eq!(s.cipher().value(), &BigUint::from(125000u32 % 391));

        let rec = s.run_attack().unwrap();
        assert_eq!((rec.p.clone(), rec.q.clone()), (BigUint::from(17u8), BigUint::from(23u8)));
        assert!(rec.key.matches(s.session_key()));
        assert_eq!(rec, s.run_attack().unwrap());
    }

    #[test]
    fn demo_session_with_random_key() {
        let params = DemoParams::default();
        for _ in 0..32 {
            let s = DemoSession::start(&params, &mut DefaultRand::default()).unwrap();
            assert!(s.run_attack().unwrap().key.matches(s.session_key()));
        }
    }

    #[test]
    fn demo_session_bad_exponent() {
        let params = DemoParams {
            e: 2,
            ..Default::default()
        };
        let err = DemoSession::start(&params, &mut FixedRand::new(50)).unwrap_err();
        assert!(err.is_no_inverse());
        assert!(matches!(err, CipherError::InvalidKeyParameters { .. }));
    }
}
