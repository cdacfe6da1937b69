use super::key::check_prime;
use super::{private_exponent, CipherValue, PublicKey, RecoveredKey};
use crate::CipherError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use utils::BigUintExt;

/// what the eavesdropper ends up with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovery {
    pub p: BigUint,
    pub q: BigUint,
    pub d: BigUint,
    pub key: RecoveredKey,
}

/// Stand-in for Shor's algorithm: the factors of the public modulus are handed in rather than
/// found, then the private exponent is re-derived from them and the captured cipher is decrypted.
///
/// Only the public key and the cipher are taken from the victim, so the recovered key proves
/// that knowing `p` and `q` is all it takes. Calling it again with the same inputs gives the same
/// result.
pub fn recover_with_known_factors(
    p: &BigUint,
    q: &BigUint,
    pk: &PublicKey,
    cipher: &CipherValue,
) -> Result<Recovery, CipherError> {
    let n = pk.modulus();
    if &(p * q) != n {
        return Err(CipherError::FactorMismatch {
            p: p.clone(),
            q: q.clone(),
            n: n.clone(),
        });
    }

    check_prime(p)?;
    check_prime(q)?;

    if cipher.value() >= n {
        return Err(CipherError::MessageOutOfRange {
            m: cipher.value().clone(),
            n: n.clone(),
        });
    }

    let (_phi, d) = private_exponent(p, q, pk.exponent())?;
    let key = RecoveredKey::new(BigUintExt(cipher.value()).modpow_binary(&d, n));
    log::info!("recovered session key {key} from cipher {cipher} with p={p}, q={q}, d={d}");

    Ok(Recovery {
        p: p.clone(),
        q: q.clone(),
        d,
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::recover_with_known_factors;
    use crate::rsa::{CipherValue, KeyMaterial, PublicKey, SessionKey};
    use crate::{CipherError, FixedRand};
    use num_bigint::BigUint;

    fn demo() -> (KeyMaterial, SessionKey, CipherValue) {
        let key =
            KeyMaterial::setup(BigUint::from(17u8), BigUint::from(23u8), BigUint::from(3u8))
                .unwrap();
        let session = SessionKey::generate(&mut FixedRand::new(50), 20..=80).unwrap();
        let cipher = key.encrypt(&session).unwrap();
        (key, session, cipher)
    }

    #[test]
    fn recover_demo_session() {
        let (key, session, cipher) = demo();
        let pk = key.public_key();
        let rec = recover_with_known_factors(key.p(), key.q(), &pk, &cipher).unwrap();
        assert_eq!(rec.d, BigUint::from(235u32));
        assert!(rec.key.matches(&session));
        assert_eq!(rec.key, key.decrypt(&cipher).unwrap());

        // factors in swapped order work as well
        let rec = recover_with_known_factors(key.q(), key.p(), &pk, &cipher).unwrap();
        assert!(rec.key.matches(&session));
    }

    #[test]
    fn recover_is_idempotent() {
        let (key, _, cipher) = demo();
        let pk = key.public_key();
        let first = recover_with_known_factors(key.p(), key.q(), &pk, &cipher).unwrap();
        for _ in 0..8 {
            let again = recover_with_known_factors(key.p(), key.q(), &pk, &cipher).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn recover_with_wrong_factors() {
        let (key, _, cipher) = demo();
        let pk = key.public_key();
        let err = recover_with_known_factors(
            &BigUint::from(13u8),
            &BigUint::from(29u8),
            &pk,
            &cipher,
        )
        .unwrap_err();
        assert!(matches!(err, CipherError::FactorMismatch { .. }));
    }

    #[test]
    fn recover_with_trivial_factors() {
        let (key, _, cipher) = demo();
        let pk = key.public_key();
        let err = recover_with_known_factors(
            &BigUint::from(1u8),
            &BigUint::from(391u32),
            &pk,
            &cipher,
        )
        .unwrap_err();
        assert!(matches!(err, CipherError::InvalidKeyParameters { .. }), "{err}");
    }

    #[test]
    fn recover_with_bad_exponent() {
        // a forged public key whose exponent shares a factor with phi
        let pk = PublicKey::new_uncheck(BigUint::from(391u32), BigUint::from(2u8));
        let cipher = CipherValue::new(BigUint::from(100u8));
        let err =
            recover_with_known_factors(&BigUint::from(17u8), &BigUint::from(23u8), &pk, &cipher)
                .unwrap_err();
        assert!(err.is_no_inverse());
    }

    #[test]
    fn recover_cipher_out_of_range() {
        let (key, _, _) = demo();
        let err = recover_with_known_factors(
            key.p(),
            key.q(),
            &key.public_key(),
            &CipherValue::new(BigUint::from(391u32)),
        )
        .unwrap_err();
        assert!(matches!(err, CipherError::MessageOutOfRange { .. }));
    }
}
