use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod args;

mod config;
pub use config::DemoConfig;

mod key;
pub use key::KeyCmd;

mod encrypt;
pub use encrypt::EncryptCmd;

mod attack;
pub use attack::AttackCmd;

mod dashboard;
pub use dashboard::DashboardCmd;
