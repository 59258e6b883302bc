mod config;
mod load;

pub use crate::config::{Config, Display};
pub use load::{get, init, ConfigError, ConfigResult, ConfigType};
