//! User configuration loaded from `config.toml`.
//!
//! The file lives at `<config dir>/folio-calc/config.toml`. A missing file
//! means defaults; every key is optional.
//!
//! ```toml
//! log_level = "folio_calc=debug"
//!
//! [display]
//! show_history = true
//! history_limit = 5
//!
//! [clipboard]
//! copy_on_evaluate = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "folio-calc";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub display: DisplayConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print completed calculations below the display.
    pub show_history: bool,
    /// Maximum number of history lines printed.
    pub history_limit: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy the display after every successful `=`.
    pub copy_on_evaluate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "folio_calc=warn".to_string(),
            display: DisplayConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_history: true,
            history_limit: 5,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// An explicitly given path must exist; a missing default file yields
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
