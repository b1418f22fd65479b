//! # Settings
//!
//! Runtime configuration, layered from lowest to highest precedence:
//!
//! 1. Built-in defaults.
//! 2. A TOML file (`<config dir>/carestay/config.toml` unless a path is given).
//! 3. `CARESTAY_*` environment variables, e.g. `CARESTAY_API_URL`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

const ENV_PREFIX: &str = "CARESTAY";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the Carestay API.
    pub api_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Where the session is persisted. Defaults to the platform config directory.
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Emit JSON logs instead of the pretty format.
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: 30,
            session_file: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Loads settings from the default file location and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Loads settings, reading `file` instead of the default location.
    ///
    /// An explicit file must exist; the default one is optional.
    pub fn load_from(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::build(file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn build(file: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?;

        match file {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(api_url = %settings.api_url, "Loaded settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(SettingsError::Invalid {
                field: "api_url",
                reason: format!("expected an http(s) URL, got `{}`", self.api_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolved session file path.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(crate::session::FileSessionStorage::default_path)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("carestay").join("config.toml"))
}
