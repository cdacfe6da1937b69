use clap::{Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;

use cipher::rsa::{recover_with_known_factors, CipherValue, PublicKey};

use crate::cmd::args::{
    demo_params, is_json, session_rng, with_json_arg, with_key_args, with_session_args,
};
use crate::cmd::{Cmd, DemoConfig};
use crate::demo::DemoSession;
use crate::ty::{NamedValues, TableShow};

/// Recovers a session key from a captured cipher the way a quantum adversary would, except that the
/// factors of the modulus are taken from the configuration instead of being computed.
pub struct AttackCmd {
    config: DemoConfig,
}

impl AttackCmd {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

fn parse_biguint(s: &str) -> Result<BigUint, num_bigint::ParseBigIntError> {
    s.parse()
}

impl Cmd for AttackCmd {
    const NAME: &'static str = "attack";

    fn cmd() -> Command {
        let cmd = Command::new(Self::NAME)
            .about("simulate Shor's algorithm: recover the session key from the known factors")
            .arg(
                Arg::new("cipher")
                    .long("cipher")
                    .short('c')
                    .action(ArgAction::Set)
                    .required(false)
                    .value_parser(parse_biguint)
                    .help("to specify the captured cipher, a fresh key exchange is recorded if not specified"),
            )
            .arg(
                Arg::new("modulus")
                    .long("modulus")
                    .short('n')
                    .action(ArgAction::Set)
                    .required(false)
                    .requires("cipher")
                    .value_parser(parse_biguint)
                    .help("to specify the public modulus the cipher was captured under, `p * q` if not specified"),
            );
        with_json_arg(with_session_args(with_key_args(cmd)))
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let params = demo_params(m, &self.config);
        let (p, q) = (BigUint::from(params.p), BigUint::from(params.q));

        let (pk, cipher, sent) = match m.get_one::<BigUint>("cipher") {
            Some(c) => {
                let n = m
                    .get_one::<BigUint>("modulus")
                    .cloned()
                    .unwrap_or_else(|| &p * &q);
                let pk = PublicKey::new_uncheck(n, BigUint::from(params.e));
                (pk, CipherValue::new(c.clone()), None)
            }
            None => {
                let mut rng = session_rng(m);
                let session = DemoSession::start(&params, rng.as_mut())?;
                log::info!(
                    "recorded key exchange, cipher {} under {}",
                    session.cipher(),
                    session.key().public_key()
                );
                (
                    session.key().public_key(),
                    session.cipher().clone(),
                    Some(session.session_key().clone()),
                )
            }
        };

        let rec = recover_with_known_factors(&p, &q, &pk, &cipher)?;
        if let Some(sent) = sent.as_ref() {
            anyhow::ensure!(
                rec.key.matches(sent),
                "recovered key {} differs from the session key {}",
                rec.key,
                sent
            );
        }

        if is_json(m) {
            let v = serde_json::json!({
                "cipher": cipher.to_string(),
                "recovered_p": rec.p.to_string(),
                "recovered_q": rec.q.to_string(),
                "private_exponent": rec.d.to_string(),
                "recovered_session_key": rec.key.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
        } else {
            let table = NamedValues::new("Quantum Factorization (Simulated Shor's Algorithm)")
                .push("Captured Cipher", &cipher)
                .push("Recovered p", &rec.p)
                .push("Recovered q", &rec.q)
                .push("Private Exponent d", &rec.d)
                .push("Recovered Session Key", &rec.key);
            print!("{}", table.table());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AttackCmd;
    use crate::cmd::Cmd;
    use cipher::CipherError;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let cmd = AttackCmd::new(Default::default());
        let m = AttackCmd::cmd()
            .get_matches_from(std::iter::once("attack").chain(args.iter().copied()));
        cmd.run(&m)
    }

    fn cipher_error(args: &[&str]) -> CipherError {
        run(args).unwrap_err().downcast::<CipherError>().unwrap()
    }

    #[test]
    fn recorded_session() {
        run(&["-s", "50"]).unwrap();
        run(&["-s", "50", "--json"]).unwrap();
        run(&[]).unwrap();
    }

    #[test]
    fn captured_cipher() {
        // 50^3 mod 391
        run(&["-c", "271"]).unwrap();
        run(&["-c", "271", "-n", "391", "--json"]).unwrap();
        run(&["--p", "61", "--q", "53", "--e", "17", "-c", "2790"]).unwrap();
    }

    #[test]
    fn captured_cipher_rejected() {
        let err = cipher_error(&["-c", "271", "-n", "377"]);
        assert!(matches!(err, CipherError::FactorMismatch { .. }), "{err}");

        let err = cipher_error(&["-c", "391"]);
        assert!(matches!(err, CipherError::MessageOutOfRange { .. }), "{err}");

        let err = cipher_error(&["--p", "1", "--q", "391", "-c", "100"]);
        assert!(matches!(err, CipherError::InvalidKeyParameters { .. }), "{err}");

        let err = cipher_error(&["--e", "2", "-c", "100"]);
        assert!(err.is_no_inverse(), "{err}");
    }

    #[test]
    fn modulus_needs_cipher() {
        let res = AttackCmd::cmd().try_get_matches_from(["attack", "-n", "391"]);
        assert!(res.is_err());
    }
}
