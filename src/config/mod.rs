//! Application settings persisted as TOML.

mod defaults;
mod io;
mod types;

pub use io::{config_path, load_from_path, load_or_default, save_to_path};
pub use types::{
    AppConfig, BalancerSettings, ConfigError, StoragePaths, StorageSettings, TrainingSettings,
};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
