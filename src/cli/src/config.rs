use std::{fs, path::Path};

use color_eyre::eyre::WrapErr;
use cube_core::ColorScheme;
use log::debug;
use serde::{Deserialize, Serialize};

/// Settings read from the `--config` file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Colors of the solved cube.
    pub scheme: ColorScheme,
    /// Number of moves `scramble` uses when `--count` is not given.
    pub scramble_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: ColorScheme::default(),
            scramble_length: 20,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Config> {
        let Some(path) = path else {
            debug!(target: "config", "No config file given, using defaults");
            return Ok(Config::default());
        };

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = toml::from_str::<Config>(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))?;
        debug!(target: "config", "Loaded {config:?} from {}", path.display());
        Ok(config)
    }
}
