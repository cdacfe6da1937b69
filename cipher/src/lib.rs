mod error;
pub use error::CipherError;

pub use rand::{BoundedRand, DefaultRand, FixedRand};

pub mod rsa;
