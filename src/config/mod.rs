//! Configuration management.
//!
//! Sources, lowest priority first:
//! 1. Default values (hardcoded)
//! 2. Config file (`--config` argument, else `CONFIG_PATH`)
//! 3. Environment variables (`WATCH_RECONCILER__SECTION__KEY`)

mod connection;
mod logging;
pub use connection::*;
pub use logging::*;


//---
use std::env;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::CONFIG_PATH_ENV;
use crate::constants::ENV_PREFIX;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Cluster endpoints, credentials and client generation
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Log level and optional log file
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Loads and validates settings.
    ///
    /// # Arguments
    /// * `config_path` - Optional config file; takes precedence over `CONFIG_PATH`
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder().add_source(Config::try_from(&Settings::default())?);

        let file = config_path
            .map(str::to_string)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok());
        if let Some(path) = file {
            config = config.add_source(File::with_name(&path).required(true));
        }

        config = config.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("connection.urls"),
        );

        let settings: Settings = config.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
