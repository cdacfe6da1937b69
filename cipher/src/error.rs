use num_bigint::BigUint;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum CipherError {
    /// `gcd(value, modulus) != 1`
    #[error("no modular inverse of {value} modulo {modulus}, gcd is {gcd}")]
    NoInverseExists {
        value: BigUint,
        modulus: BigUint,
        gcd: BigUint,
    },

    #[error("invalid rsa key parameters: {msg}")]
    InvalidKeyParameters {
        msg: String,
        #[source]
        source: Option<Box<CipherError>>,
    },

    #[error("rsa: message {m} needs to be less than the modulus {n}")]
    MessageOutOfRange { m: BigUint, n: BigUint },

    #[error("session key {value} is not in [{low}, {high}]")]
    SessionKeyOutOfRange { value: u64, low: u64, high: u64 },

    #[error("invalid session key range [{low}, {high}]")]
    InvalidSessionRange { low: u64, high: u64 },

    #[error("factors {p} * {q} do not match the modulus {n}")]
    FactorMismatch { p: BigUint, q: BigUint, n: BigUint },
}

impl CipherError {
    pub(crate) fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKeyParameters {
            msg: msg.into(),
            source: None,
        }
    }

    /// whether this error is, or was caused by, a missing modular inverse
    pub fn is_no_inverse(&self) -> bool {
        match self {
            Self::NoInverseExists { .. } => true,
            Self::InvalidKeyParameters {
                source: Some(src), ..
            } => src.is_no_inverse(),
            _ => false,
        }
    }
}
