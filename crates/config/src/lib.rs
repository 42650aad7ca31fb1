//! Layered configuration.
//!
//! Values are resolved from, in increasing priority:
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON by extension), either given
//!    explicitly or `sabun.toml` in the platform configuration directory,
//! 3. `SABUN_`-prefixed environment variables (e.g. `SABUN_LOAD_TIMEOUT_SECS`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "SABUN_";
const DEFAULT_FILE_NAME: &str = "sabun.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds a single chart may take to parse before it is abandoned.
    pub load_timeout_secs: u64,
    /// Chart loads in flight at once during a scan.
    pub max_concurrency: usize,
    /// Attempts (including the first) for a query against a busy catalog.
    pub busy_retries: u32,
    /// Fixed delay between busy retries, in milliseconds.
    pub busy_retry_delay_ms: u64,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            load_timeout_secs: 5,
            max_concurrency: 100,
            busy_retries: 10,
            busy_retry_delay_ms: 100,
        }
    }
}

impl Config {
    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sabun").map(|dirs| dirs.config_dir().join(DEFAULT_FILE_NAME))
    }

    /// Loads the configuration, reading `explicit` if given (it must exist)
    /// or the [default file](Self::default_path) if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };
        if let Some(file) = &file {
            tracing::debug!(path = %file.display(), "loading configuration file");
        }
        Self::from_figment(Self::figment(file.as_deref()))
    }

    /// The layered [`Figment`] without extracting it.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = match file.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
                Some("yaml" | "yml") => figment.merge(Yaml::file(file)),
                Some("json") => figment.merge(Json::file(file)),
                _ => figment.merge(Toml::file(file)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts and validates a configuration from any [`Figment`].
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.load_timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("load_timeout_secs"));
        }
        if self.max_concurrency == 0 {
            exn::bail!(ErrorKind::Invalid("max_concurrency"));
        }
        if self.busy_retries == 0 {
            exn::bail!(ErrorKind::Invalid("busy_retries"));
        }
        if self.busy_retry_delay_ms == 0 {
            exn::bail!(ErrorKind::Invalid("busy_retry_delay_ms"));
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn busy_retry_delay(&self) -> Duration {
        Duration::from_millis(self.busy_retry_delay_ms)
    }
}
