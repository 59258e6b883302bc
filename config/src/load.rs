use std::borrow::Cow;
use std::path::Path;

use once_cell::sync::OnceCell;

use misc::*;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parsing(#[from] ron::de::Error),

    #[error("Config has already been initialized")]
    AlreadyInitialized,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

pub enum ConfigType<'a> {
    String(&'a str),
    File(&'a Path),
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Parses and installs the global config. Can only succeed once, and not after [get] has already
/// fallen back to the defaults
pub fn init(cfg: ConfigType) -> ConfigResult<()> {
    // parse config and fail early
    let config = cfg.load()?;
    debug!("parsed config"; "cell_width" => config.display.cell_width, "scenarios" => config.scenarios.len());

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The global config, or the defaults if [init] was never called
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

impl<'a> ConfigType<'a> {
    pub fn load(&self) -> ConfigResult<Config> {
        let bytes = match self {
            ConfigType::String(s) => Cow::Borrowed(*s),
            ConfigType::File(path) => {
                let contents = std::fs::read_to_string(path)?;
                Cow::Owned(contents)
            }
        };

        ron::de::from_str(&bytes).map_err(ConfigError::Parsing)
    }
}
