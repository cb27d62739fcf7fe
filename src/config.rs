use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use channel_bridge::LogLevel;
use dashmap::DashMap;
use tracing::{debug, info};

pub const LOG_LEVEL_KEY: &str = "WIREDASH_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "WIREDASH_LOG_DIR";

/// Where configuration values come from.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process environment, after loading `.env` from `env_file` if it exists.
///
/// The file is read before logging is up, so the outcome is kept and
/// reported later through [`EnvConfigSource::log_load_outcome`].
#[derive(Clone, Debug)]
pub struct EnvConfigSource {
    env_file: PathBuf,
    load_error: Option<String>,
}

impl EnvConfigSource {
    pub fn new(env_file: PathBuf) -> Self {
        let load_error = dotenvy::from_path(&env_file).err().map(|e| e.to_string());
        Self {
            env_file,
            load_error,
        }
    }

    pub fn env_file(&self) -> &PathBuf {
        &self.env_file
    }

    pub fn loaded(&self) -> bool {
        self.load_error.is_none()
    }

    /// Call once the subscriber is installed.
    pub fn log_load_outcome(&self) {
        match &self.load_error {
            None => info!(path = %self.env_file.display(), "loaded environment file"),
            Some(err) => debug!(
                path = %self.env_file.display(),
                error = %err,
                "no environment file loaded"
            ),
        }
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new(PathBuf::from(".env"))
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory values, mostly for tests.
#[derive(Clone, Debug, Default)]
pub struct MapConfigSource {
    values: DashMap<String, String>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }
}

/// Settings the `wiredash` binary runs with.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BridgeConfig {
    pub log_level: LogLevel,
    /// When set, logs also go to rolling files in this directory.
    pub log_dir: Option<PathBuf>,
}

impl BridgeConfig {
    /// Read settings from `source`; missing keys keep their defaults.
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(source.get(LOG_LEVEL_KEY)) {
            config.log_level = LogLevel::from_str(raw.trim())
                .with_context(|| format!("{LOG_LEVEL_KEY}: `{raw}` is not a log level"))?;
        }
        config.log_dir = non_empty(source.get(LOG_DIR_KEY)).map(PathBuf::from);

        Ok(config)
    }

    /// Command line flags win over whatever was configured.
    pub fn with_overrides(
        mut self,
        log_level: Option<LogLevel>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
