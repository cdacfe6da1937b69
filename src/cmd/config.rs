use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct DemoConfig {
    // the two rsa primes
    pub p: u64,
    pub q: u64,

    // public exponent
    pub e: u64,

    // closed range the session key is drawn from
    pub session_min: u64,
    pub session_max: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            p: 17,
            q: 23,
            e: 3,
            session_min: 20,
            session_max: 80,
        }
    }
}

impl DemoConfig {
    /// `~/.config/qrsa/config.{json,json5}`
    pub fn default_file() -> Option<PathBuf> {
        home::home_dir().map(|mut path| {
            path.push(".config");
            path.push("qrsa");
            path.push("config");
            path
        })
    }

    /// defaults, then the config file, then the `QRSA__*` environment variables
    pub fn load(f: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&DemoConfig::default())?;

        let mut config = Config::builder().add_source(default_config);

        match f {
            Some(f) => {
                config = config.add_source(config::File::from(f).required(true));
            }
            None => {
                if let Some(f) = Self::default_file() {
                    config = config.add_source(
                        config::File::with_name(&f.to_string_lossy()).required(false),
                    );
                }
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("QRSA")
                .try_parsing(true)
                .separator("__"),
        );

        let config = config.build().context("failed to build the configuration")?;
        let demo_config: DemoConfig = config
            .try_deserialize()
            .context("failed to deserialize the configuration")?;
        demo_config.validate()?;

        log::trace!("{:?}", demo_config);

        Ok(demo_config)
    }

    pub fn validate(&self) -> Result<(), DemoError> {
        if self.session_min > self.session_max {
            return Err(DemoError::InvalidConfig(format!(
                "session key range [{}, {}] is empty",
                self.session_min, self.session_max
            )));
        }

        Ok(())
    }

    pub fn session_range(&self) -> RangeInclusive<u64> {
        self.session_min..=self.session_max
    }
}
