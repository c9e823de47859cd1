//! Optional TOML configuration, located through `HELLO_RETRO_CONFIG`.
//!
//! ```toml
//! log_file = "core.log"
//! log_level = "debug"
//! cursor_mode = "bounce"
//! step = 2
//! text = "Hello World"
//! ```
//!
//! Every key is optional. Renderer keys sit at the top level next to the
//! logging keys.

use std::path::{Path, PathBuf};
use std::{fs, io};

use hello_core::{ConfigError, CoreConfig};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::logger::DEFAULT_LOG_FILE;

pub const CONFIG_ENV: &str = "HELLO_RETRO_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetroConfig {
    /// Fallback log file used while the frontend offers no log interface.
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    #[serde(flatten)]
    pub core: CoreConfig,
}

impl Default for RetroConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Debug,
            core: CoreConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl RetroConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.core.validate()?;
        Ok(config)
    }

    /// `Ok(None)` when the variable is unset or empty.
    pub fn from_env() -> Result<Option<Self>, ConfigLoadError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)).map(Some),
            _ => Ok(None),
        }
    }
}
