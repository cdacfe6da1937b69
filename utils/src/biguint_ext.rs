use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One, Zero};
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// $self^{exponent} \mod modulus$ by binary exponentiation.
    ///
    /// Scans the exponent from the least significant bit, squaring the base on every bit and
    /// multiplying it into the accumulator on every set bit. Each product is reduced by `modulus`,
    /// so no intermediate value exceeds `modulus^2`.
    ///
    /// panic if `modulus` is zero.
    pub fn modpow_binary(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "modpow_binary: modulus cannot be zero");

        let mut base = self.deref() % modulus;
        let mut acc = BigUint::one() % modulus;

        for i in 0..exponent.bits() {
            if exponent.bit(i) {
                acc *= &base;
                acc %= modulus;
            }
            base = &base * &base;
            base %= modulus;
        }

        acc
    }

    /// extended Euclidean algorithm
    ///
    /// returns `(g, x, y)` such that $g = gcd(self, other) = self \cdot x + other \cdot y$.
    pub fn extended_gcd(&self, other: &BigUint) -> (BigUint, BigInt, BigInt) {
        let (mut old_r, mut r) = (BigInt::from(self.deref().clone()), BigInt::from(other.clone()));
        let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
        let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let (quo, rem) = old_r.div_rem(&r);
            old_r = std::mem::replace(&mut r, rem);

            let next_s = &old_s - &quo * &s;
            old_s = std::mem::replace(&mut s, next_s);

            let next_t = &old_t - &quo * &t;
            old_t = std::mem::replace(&mut t, next_t);
        }

        // both inputs are unsigned, so the remainder sequence never goes negative
        (old_r.magnitude().clone(), old_s, old_t)
    }

    pub fn gcd(&self, other: &BigUint) -> BigUint {
        self.extended_gcd(other).0
    }

    /// <<算法导论>>
    /// 定理31.23: 若有d=gcd(a, n), 假设对于某些整数x'和y', 有d=ax'+ny'. 如果d|b, 则方程
    /// ax=b(mod n)有一个解的值位x0, 则x0=x'(b/d) mod n;
    ///
    /// self * inv = 1 \mod modulus, `None` if `gcd(self, modulus) != 1` or `modulus` is zero.
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() {
            return None;
        }

        let a = self.deref() % modulus;
        let (g, x, _) = BigUintExt(&a).extended_gcd(modulus);
        if !g.is_one() {
            return None;
        }

        x.rem_euclid(&BigInt::from(modulus.clone())).to_biguint()
    }

    /// strong probable prime test against the twelve prime bases up to 37.
    ///
    /// the answer is exact for every `n < 3.3 * 10^24`, which covers all `u64` inputs. the
    /// cost is a dozen modular exponentiations whatever the size of `n`.
    pub fn is_prime(&self) -> bool {
        const BASES: [u8; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

        let n = self.deref();
        if n < &BigUint::from(2u8) {
            return false;
        }

        for b in BASES {
            if (n % b).is_zero() {
                return *n == BigUint::from(b);
            }
        }

        // n = 2^s * r + 1, r odd
        let n_m1 = n - 1u8;
        let s = n_m1.trailing_zeros().unwrap_or(0);
        let r = &n_m1 >> s;

        BASES
            .iter()
            .all(|&a| !self.miller_rabin_witness(s, &r, &n_m1, &BigUint::from(a)))
    }

    /// whether `a` proves that the odd `n` is composite, `n - 1 = 2^s * r`
    fn miller_rabin_witness(&self, s: u64, r: &BigUint, n_m1: &BigUint, a: &BigUint) -> bool {
        let n = self.deref();
        let mut y = BigUintExt(a).modpow_binary(r, n);

        for _ in 0..s {
            let y2 = &y * &y % n;
            if y2.is_one() && !y.is_one() && &y != n_m1 {
                return true;
            }
            y = y2;
        }

        !y.is_one()
    }
}
