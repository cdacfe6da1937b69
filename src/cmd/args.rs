use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use cipher::{BoundedRand, DefaultRand, FixedRand};

use crate::cmd::DemoConfig;
use crate::demo::DemoParams;

/// `--p`, `--q` and `--e`, each overriding the configuration
pub(super) fn with_key_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("p")
            .long("p")
            .action(ArgAction::Set)
            .required(false)
            .value_parser(value_parser!(u64))
            .help("to specify the first rsa prime"),
    )
    .arg(
        Arg::new("q")
            .long("q")
            .action(ArgAction::Set)
            .required(false)
            .value_parser(value_parser!(u64))
            .help("to specify the second rsa prime"),
    )
    .arg(
        Arg::new("e")
            .long("e")
            .action(ArgAction::Set)
            .required(false)
            .value_parser(value_parser!(u64))
            .help("to specify the rsa public exponent"),
    )
}

/// `--session-key`, replaces the random draw with a fixed value
pub(super) fn with_session_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("session-key")
            .long("session-key")
            .short('s')
            .action(ArgAction::Set)
            .required(false)
            .value_parser(value_parser!(u64))
            .help("to use a fixed session key instead of a random one in the configured range"),
    )
}

pub(super) fn with_json_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("print as json"),
    )
}

pub(super) fn demo_params(m: &ArgMatches, config: &DemoConfig) -> DemoParams {
    let mut params = DemoParams::from(config);
    if let Some(&p) = m.get_one::<u64>("p") {
        params.p = p;
    }
    if let Some(&q) = m.get_one::<u64>("q") {
        params.q = q;
    }
    if let Some(&e) = m.get_one::<u64>("e") {
        params.e = e;
    }
    params
}

pub(super) fn session_rng(m: &ArgMatches) -> Box<dyn BoundedRand> {
    match m.get_one::<u64>("session-key") {
        Some(&x) => Box::new(FixedRand::new(x)),
        None => Box::new(DefaultRand::default()),
    }
}

pub(super) fn is_json(m: &ArgMatches) -> bool {
    m.get_flag("json")
}

#[cfg(test)]
mod tests {
    use super::{
        demo_params, is_json, session_rng, with_json_arg, with_key_args, with_session_args,
    };
    use crate::cmd::DemoConfig;
    use cipher::BoundedRand;
    use clap::Command;

    fn app() -> Command {
        with_json_arg(with_session_args(with_key_args(Command::new("t"))))
    }

    #[test]
    fn overrides_config() {
        let m = app().get_matches_from(["t", "--p", "61", "--e", "17", "--json"]);
        let params = demo_params(&m, &DemoConfig::default());
        assert_eq!((params.p, params.q, params.e), (61, 23, 17));
        assert_eq!(params.session_range, 20..=80);
        assert!(is_json(&m));
    }

    #[test]
    fn fixed_session_key() {
        let m = app().get_matches_from(["t", "-s", "42"]);
        assert_eq!(session_rng(&m).gen_range(20..=80), 42);
        assert!(!is_json(&m));
    }
}
