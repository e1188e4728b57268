//! Analyzer configuration: TOML file, then `SKILL_*` environment overrides.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::Thresholds;

/// 1.0 second per position.
pub const DEFAULT_THINK_TIME_MS: u64 = 1_000;
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 500;
pub const DEFAULT_ENGINE_PROGRAM: &str = "stockfish";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How to launch and drive the external UCI engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Executable name or path.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Fixed thinking time per analyzed position.
    pub think_time_ms: u64,
    /// Sent as `setoption name <key> value <value>` after the handshake.
    pub options: BTreeMap<String, String>,
    /// How long to wait for the process to exit after `quit` before killing it.
    pub shutdown_grace_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            args: Vec::new(),
            think_time_ms: DEFAULT_THINK_TIME_MS,
            options: BTreeMap::new(),
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl EngineConfig {
    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_time_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub engine: EngineConfig,
    pub thresholds: Thresholds,
}

impl AnalyzerConfig {
    /// Reads a TOML file; missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `SKILL_ENGINE_PATH` and `SKILL_THINK_TIME_MS` from the process
    /// environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(program) = lookup("SKILL_ENGINE_PATH").filter(|v| !v.trim().is_empty()) {
            self.engine.program = PathBuf::from(program);
        }
        match lookup("SKILL_THINK_TIME_MS").map(|v| v.parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 => self.engine.think_time_ms = ms,
            Some(_) => tracing::warn!("ignoring invalid SKILL_THINK_TIME_MS"),
            None => {}
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.think_time_ms == 0 {
            return Err(ConfigError::Invalid(
                "engine.think_time_ms must be greater than zero".to_string(),
            ));
        }
        self.thresholds.validate().map_err(ConfigError::Invalid)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
