use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::cmd::args::{
    demo_params, is_json, session_rng, with_json_arg, with_key_args, with_session_args,
};
use crate::cmd::{Cmd, DemoConfig};
use crate::demo::DemoSession;
use crate::report::{Dashboard, Section};

pub struct DashboardCmd {
    config: DemoConfig,
}

impl DashboardCmd {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    fn sections(m: &ArgMatches) -> anyhow::Result<Vec<Section>> {
        match m.get_many::<String>("section") {
            Some(names) => Ok(names
                .map(|s| s.parse::<Section>())
                .collect::<Result<Vec<_>, _>>()?),
            None => Ok(Section::ALL.to_vec()),
        }
    }
}

impl Cmd for DashboardCmd {
    const NAME: &'static str = "dashboard";

    fn cmd() -> Command {
        let names = Section::ALL.map(|s| s.name()).join(", ");
        let cmd = Command::new(Self::NAME)
            .about("show why rsa key exchange falls to Shor's algorithm and qkd does not")
            .arg(
                Arg::new("attack")
                    .long("attack")
                    .short('a')
                    .action(ArgAction::SetTrue)
                    .help("run the simulated Shor's algorithm against the recorded key exchange"),
            )
            .arg(
                Arg::new("section")
                    .long("section")
                    .action(ArgAction::Append)
                    .required(false)
                    .help(format!("only show the specified sections, one of: {names}")),
            );
        with_json_arg(with_session_args(with_key_args(cmd)))
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let sections = Self::sections(m)?;
        let params = demo_params(m, &self.config);
        let mut rng = session_rng(m);
        let session = DemoSession::start(&params, rng.as_mut())?;

        let recovery = if m.get_flag("attack") {
            Some(session.run_attack()?)
        } else {
            None
        };
        let dashboard = Dashboard::new(&session, recovery.as_ref());

        if is_json(m) {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        } else {
            println!(
                "Quantum Attack on HTTPS using Shor's Algorithm ({})\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            print!("{}", dashboard.render(&sections));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardCmd;
    use crate::cmd::Cmd;
    use crate::report::Section;

    #[test]
    fn parse_sections() {
        let m = DashboardCmd::cmd().get_matches_from([
            "dashboard",
            "--section",
            "flow",
            "--section",
            "verdict",
        ]);
        assert_eq!(
            DashboardCmd::sections(&m).unwrap(),
            vec![Section::Flow, Section::Verdict]
        );

        let m = DashboardCmd::cmd().get_matches_from(["dashboard"]);
        assert_eq!(DashboardCmd::sections(&m).unwrap(), Section::ALL.to_vec());

        let m = DashboardCmd::cmd().get_matches_from(["dashboard", "--section", "radar"]);
        assert!(DashboardCmd::sections(&m).is_err());
    }

    #[test]
    fn run_with_fixed_session() {
        let cmd = DashboardCmd::new(Default::default());
        let m = DashboardCmd::cmd().get_matches_from(["dashboard", "-s", "50", "--attack"]);
        cmd.run(&m).unwrap();

        let m = DashboardCmd::cmd().get_matches_from(["dashboard", "-s", "50", "--e", "2"]);
        assert!(cmd.run(&m).is_err());
    }
}
