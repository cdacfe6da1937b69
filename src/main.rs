use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use qrsa::cmd::{AttackCmd, Cmd, DashboardCmd, DemoConfig, EncryptCmd, KeyCmd};

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("QRSA_VERSION_INFO");
    let app = Command::new("qrsa")
        .version(version)
        .about("toy rsa key exchange under a simulated quantum adversary")
        .arg(
            Arg::new("config")
                .long("config")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .required(false)
                .help("to specify the config file, default is ~/.config/qrsa/config.json"),
        )
        .subcommand(KeyCmd::cmd())
        .subcommand(EncryptCmd::cmd())
        .subcommand(AttackCmd::cmd())
        .subcommand(DashboardCmd::cmd())
        .get_matches();

    let Some((s, m)) = app.subcommand() else {
        println!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            version,
            env!("QRSA_GIT_INFO")
        );
        return;
    };

    let Some(config) =
        qrsa::log_error(DemoConfig::load(m.get_one::<PathBuf>("config").map(|p| p.as_path())))
    else {
        std::process::exit(1);
    };

    let res = match s {
        KeyCmd::NAME => KeyCmd::new(config).run(m),
        EncryptCmd::NAME => EncryptCmd::new(config).run(m),
        AttackCmd::NAME => AttackCmd::new(config).run(m),
        DashboardCmd::NAME => DashboardCmd::new(config).run(m),
        name => Err(anyhow::anyhow!("unsupport for {}", name)),
    };

    if qrsa::log_error(res).is_none() {
        std::process::exit(1);
    }
}
