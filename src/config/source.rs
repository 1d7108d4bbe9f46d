//! Configuration sources.
//!
//! A `ConfigSource` is what an execution context calls, at most once per
//! successful build, to obtain its configuration. Sources must return a
//! complete, validated `EdgeConfig` or an error; never a partial value.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::EdgeConfig;
use crate::config::validation::validate_config;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "EDGE_GATE_CONFIG";

/// Produces a validated configuration.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<EdgeConfig, ConfigError>;
}

/// Reads a TOML or JSON file on every `load`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path taken from `EDGE_GATE_CONFIG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        env::var_os(CONFIG_ENV)
            .map(Self::new)
            .ok_or(ConfigError::MissingEnv(CONFIG_ENV))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<EdgeConfig, ConfigError> {
        tracing::debug!(path = %self.path.display(), "Loading configuration file");
        load_config(&self.path)
    }
}

/// Serves an in-memory configuration, validated on each `load`.
#[derive(Debug, Clone)]
pub struct StaticSource {
    config: EdgeConfig,
}

impl StaticSource {
    pub fn new(config: EdgeConfig) -> Self {
        Self { config }
    }
}

impl ConfigSource for StaticSource {
    fn load(&self) -> Result<EdgeConfig, ConfigError> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;
        Ok(self.config.clone())
    }
}
