use super::{CipherValue, RecoveredKey, SessionKey};
use crate::CipherError;
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utils::BigUintExt;

#[derive(Clone, Debug, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // public exponent, gcd(e, (p-1)(q-1)) = 1
    e: BigUint,
}

/// everything derived from the two primes and the public exponent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterial {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    // (p-1)(q-1)
    phi: BigUint,
    e: BigUint,
    // d * e = 1 % phi
    d: BigUint,
}

/// $\phi = (p-1)(q-1)$ and $d = e^{-1} \mod \phi$
///
/// the coprimality of `e` and $\phi$ is checked before the inverse is computed, a violation is
/// reported as [`CipherError::InvalidKeyParameters`] caused by [`CipherError::NoInverseExists`].
pub fn private_exponent(
    p: &BigUint,
    q: &BigUint,
    e: &BigUint,
) -> Result<(BigUint, BigUint), CipherError> {
    if p < &BigUint::one() || q < &BigUint::one() {
        return Err(CipherError::invalid_key("rsa: the factors must be positive"));
    }

    let phi = (p - 1u32) * (q - 1u32);
    let no_inverse = |gcd: BigUint| CipherError::InvalidKeyParameters {
        msg: format!("rsa: public exponent {e} is not coprime to phi {phi}"),
        source: Some(Box::new(CipherError::NoInverseExists {
            value: e.clone(),
            modulus: phi.clone(),
            gcd,
        })),
    };

    let gcd = BigUintExt(e).gcd(&phi);
    if !gcd.is_one() {
        return Err(no_inverse(gcd));
    }

    let d = BigUintExt(e).modinv(&phi).ok_or_else(|| no_inverse(gcd))?;
    Ok((phi, d))
}

impl PublicKey {
    /// note: not to check the `n` and `e` are right RSA parameters
    pub fn new_uncheck(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// $m^e \mod n, m \lt n$
    fn rsaep_uncheck(&self, m: &BigUint) -> BigUint {
        BigUintExt(m).modpow_binary(&self.e, &self.n)
    }

    /// RSAEP: RSA Encrypt primitive
    pub fn rsaep(&self, m: &BigUint) -> Result<BigUint, CipherError> {
        if m < &self.n {
            Ok(self.rsaep_uncheck(m))
        } else {
            Err(CipherError::MessageOutOfRange {
                m: m.clone(),
                n: self.n.clone(),
            })
        }
    }

    pub fn encrypt(&self, key: &SessionKey) -> Result<CipherValue, CipherError> {
        self.rsaep(key.value()).map(CipherValue::new)
    }
}

pub(super) fn check_prime(x: &BigUint) -> Result<(), CipherError> {
    if BigUintExt(x).is_prime() {
        Ok(())
    } else {
        Err(CipherError::invalid_key(format!("rsa: {x} is not a prime")))
    }
}

impl KeyMaterial {
    /// derive `n`, `phi` and `d` from the primes `p`, `q` and the public exponent `e`.
    ///
    /// fails with [`CipherError::InvalidKeyParameters`] if `p` or `q` is not a prime, `p == q`,
    /// `e < 2` or `gcd(e, phi) != 1`.
    pub fn setup(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, CipherError> {
        check_prime(&p)?;
        check_prime(&q)?;

        if p == q {
            return Err(CipherError::invalid_key(format!(
                "rsa: the primes need to be distinct, both are {p}"
            )));
        }

        if e < BigUint::from(2u8) {
            return Err(CipherError::invalid_key(format!(
                "rsa: public exponent {e} is too small"
            )));
        }

        let (phi, d) = private_exponent(&p, &q, &e)?;
        let n = &p * &q;
        log::debug!("rsa setup: p={p}, q={q}, n={n}, phi={phi}, e={e}, d={d}");

        Ok(Self { p, q, n, phi, e, d })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    pub fn phi(&self) -> &BigUint {
        &self.phi
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.e
    }

    pub fn private_exponent(&self) -> &BigUint {
        &self.d
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::new_uncheck(self.n.clone(), self.e.clone())
    }

    pub fn encrypt(&self, key: &SessionKey) -> Result<CipherValue, CipherError> {
        self.public_key().encrypt(key)
    }

    /// RSADP: RSA Decrypt primitive
    pub fn rsadp(&self, c: &BigUint) -> Result<BigUint, CipherError> {
        if c < &self.n {
            Ok(BigUintExt(c).modpow_binary(&self.d, &self.n))
        } else {
            Err(CipherError::MessageOutOfRange {
                m: c.clone(),
                n: self.n.clone(),
            })
        }
    }

    pub fn decrypt(&self, c: &CipherValue) -> Result<RecoveredKey, CipherError> {
        self.rsadp(c.value()).map(RecoveredKey::new)
    }

    pub fn is_valid(&self) -> Result<(), CipherError> {
        if &self.p * &self.q != self.n {
            return Err(CipherError::invalid_key("rsa: invalid modulus"));
        }

        if !((&self.d * &self.e) % &self.phi).is_one() {
            return Err(CipherError::invalid_key("rsa: invalid exponent"));
        }

        Ok(())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(n={}, e={})", self.n, self.e)
    }
}

impl Display for KeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "p={}, q={}, n={}, phi={}, e={}, d={}",
            self.p, self.q, self.n, self.phi, self.e, self.d
        )
    }
}
