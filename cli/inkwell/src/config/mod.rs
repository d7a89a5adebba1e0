use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use config::{Config as HierarchicalConfig, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use xdg::BaseDirectories;

/// Name of inkwell managed directories (config, data)
pub const INKWELL_DIR_NAME: &str = "inkwell";
pub const INKWELL_CONFIG_FILE: &str = "inkwell.toml";
const INKWELL_CONFIG_DIR_VAR: &str = "INKWELL_CONFIG_DIR";
const INKWELL_ENV_PREFIX: &str = "INKWELL_";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the backend API
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub api_base_url: String,
    /// Development mode, defaults to on for debug builds
    pub dev: bool,
    /// Serve canned data instead of contacting the backend.
    /// Only honoured in development mode.
    pub use_mock: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory where inkwell stores persistent data (default:
    /// `$XDG_DATA_HOME/inkwell`)
    pub data_dir: PathBuf,
    /// Directory where inkwell loads its configuration file from (default:
    /// `$XDG_CONFIG_HOME/inkwell`)
    pub config_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHome,
    #[error("path is not valid unicode: {0:?}")]
    NonUnicodePath(PathBuf),
    #[error("could not read configuration")]
    Read(#[from] config::ConfigError),
    #[error("'timeout_secs' must be greater than zero")]
    ZeroTimeout,
}

impl Config {
    /// Creates a [Config] from defaults, the config file and `INKWELL_*`
    /// environment variables, in increasing order of precedence.
    pub fn parse() -> Result<Config, ConfigError> {
        let dirs = BaseDirectories::with_prefix(INKWELL_DIR_NAME);
        let data_dir = dirs.get_data_home().ok_or(ConfigError::NoHome)?;

        let config_dir = match env::var(INKWELL_CONFIG_DIR_VAR) {
            Ok(v) => {
                debug!("`${INKWELL_CONFIG_DIR_VAR}` set: {v}");
                PathBuf::from(v)
            },
            Err(_) => dirs.get_config_home().ok_or(ConfigError::NoHome)?,
        };

        let envs = env::vars()
            .filter_map(|(k, v)| {
                k.strip_prefix(INKWELL_ENV_PREFIX)
                    .map(|k| (k.to_lowercase(), v))
            })
            .collect::<HashMap<_, _>>();

        Self::read(data_dir, config_dir, envs)
    }

    fn read(
        data_dir: PathBuf,
        config_dir: PathBuf,
        envs: HashMap<String, String>,
    ) -> Result<Config, ConfigError> {
        let config_file = config_dir.join(INKWELL_CONFIG_FILE);
        debug!(path = %config_file.display(), "reading config");

        let final_config = HierarchicalConfig::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("dev", cfg!(debug_assertions))?
            .set_default("use_mock", false)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("data_dir", path_str(&data_dir)?)?
            // The config file cannot change the config dir.
            .set_override("config_dir", path_str(&config_dir)?)?
            .add_source(
                config::File::from(config_file)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().source(Some(envs)).try_parsing(true))
            .build()?;

        let config: Config = final_config.try_deserialize()?;
        if config.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }
}

fn path_str(path: &Path) -> Result<String, ConfigError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::NonUnicodePath(path.to_path_buf()))
}
