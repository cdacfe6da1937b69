//! RSA with demo sized parameters
//!
//! - 选择两个不同的质数$p$和$q$, 则模数$n=p*q$, $\phi(n)=(p-1)(q-1)$;
//! - 公钥指数$e$需要与$\phi(n)$互质;
//! - 私钥指数$d$满足: $d*e \equiv 1 \mod \phi(n)$;
//!
//! 加密: $c = m ^ e \mod n$;
//!
//! 解密: $m = c ^ d \mod n$;
//!
//! 原理: 欧拉定理$a^{\phi(n)} \equiv 1 \mod n$
//! - $m ^ {k(p-1)(q-1)+1} \equiv m \mod n$
//!
//! The numbers are intentionally tiny. Anyone who knows $p$ and $q$ re-derives $d$ at once,
//! which is what a large enough quantum computer running Shor's algorithm would hand an
//! eavesdropper. [`recover_with_known_factors`] plays that eavesdropper, it is given the factors
//! instead of searching for them.

mod key;
pub use key::{private_exponent, KeyMaterial, PublicKey};

mod session;
pub use session::{CipherValue, RecoveredKey, SessionKey};

mod recover;
pub use recover::{recover_with_known_factors, Recovery};
