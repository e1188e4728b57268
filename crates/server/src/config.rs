use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use skill_analysis::{AnalyzerConfig, ConfigError};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Uploaded PGN files are stored here, one file per upload.
    pub upload_dir: PathBuf,
    /// Holds one PDF guide per skill category.
    pub guides_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            upload_dir: PathBuf::from("uploads"),
            guides_dir: PathBuf::from("guides"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Server settings plus the analyzer's `[engine]` and `[thresholds]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(flatten)]
    pub analysis: AnalyzerConfig,
}

impl AppConfig {
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

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// `SKILL_BIND_ADDR`, `SKILL_UPLOAD_DIR`, `SKILL_GUIDES_DIR` and
    /// `SKILL_MAX_UPLOAD_BYTES`, on top of the analyzer's own variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.analysis.apply_overrides(&lookup);

        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(bind) = non_empty("SKILL_BIND_ADDR") {
            self.server.bind = bind;
        }
        if let Some(dir) = non_empty("SKILL_UPLOAD_DIR") {
            self.server.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty("SKILL_GUIDES_DIR") {
            self.server.guides_dir = PathBuf::from(dir);
        }
        self.server.max_upload_bytes = read_usize(
            &lookup,
            "SKILL_MAX_UPLOAD_BYTES",
            self.server.max_upload_bytes,
        );
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind must not be empty".to_string()));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        self.analysis.validate()
    }
}

fn read_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    lookup(name)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
