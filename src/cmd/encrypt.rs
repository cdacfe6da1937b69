use clap::{ArgMatches, Command};

use crate::cmd::args::{
    demo_params, is_json, session_rng, with_json_arg, with_key_args, with_session_args,
};
use crate::cmd::{Cmd, DemoConfig};
use crate::demo::DemoSession;
use crate::ty::{NamedValues, TableShow};

pub struct EncryptCmd {
    config: DemoConfig,
}

impl EncryptCmd {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Cmd for EncryptCmd {
    const NAME: &'static str = "encrypt";

    fn cmd() -> Command {
        let cmd = Command::new(Self::NAME)
            .about("draw a session key and encrypt it with the rsa public key");
        with_json_arg(with_session_args(with_key_args(cmd)))
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let params = demo_params(m, &self.config);
        let mut rng = session_rng(m);
        let session = DemoSession::start(&params, rng.as_mut())?;
        let pk = session.key().public_key();

        if is_json(m) {
            let v = serde_json::json!({
                "n": pk.modulus().to_string(),
                "e": pk.exponent().to_string(),
                "session_key": session.session_key().to_string(),
                "cipher": session.cipher().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
        } else {
            let table = NamedValues::new("Encrypted Session Key")
                .push("Public Key", &pk)
                .push("Session Key", session.session_key())
                .push("Cipher", session.cipher());
            print!("{}", table.table());
        }

        Ok(())
    }
}
