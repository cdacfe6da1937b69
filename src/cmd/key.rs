use clap::{ArgMatches, Command};

use crate::cmd::args::{demo_params, is_json, with_json_arg, with_key_args};
use crate::cmd::{Cmd, DemoConfig};
use crate::ty::{NamedValues, TableShow};

pub struct KeyCmd {
    config: DemoConfig,
}

impl KeyCmd {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Cmd for KeyCmd {
    const NAME: &'static str = "key";

    fn cmd() -> Command {
        let cmd =
            Command::new(Self::NAME).about("derive the demo rsa key material from two primes");
        with_json_arg(with_key_args(cmd))
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let key = demo_params(m, &self.config).key_material()?;

        if is_json(m) {
            let v = serde_json::json!({
                "p": key.p().to_string(),
                "q": key.q().to_string(),
                "n": key.modulus().to_string(),
                "phi": key.phi().to_string(),
                "e": key.public_exponent().to_string(),
                "d": key.private_exponent().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
        } else {
            let table = NamedValues::new("RSA Key Material")
                .push("Prime p", key.p())
                .push("Prime q", key.q())
                .push("Public Modulus n", key.modulus())
                .push("phi(n)", key.phi())
                .push("Public Exponent e", key.public_exponent())
                .push("Private Exponent d", key.private_exponent());
            print!("{}", table.table());
        }

        Ok(())
    }
}
