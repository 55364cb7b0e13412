// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration management.
//!
//! Configuration is read from the first existing file among:
//! - the path given with `--config`
//! - `./sanitas.toml`
//! - `$XDG_CONFIG_HOME/sanitas/config.toml`
//!
//! A missing file yields defaults. An explicit `--config` path must exist.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use sanitas_core::tracker::{IdSchemeParam, TrackerIdSchemeParams};
use sanitas_core::SystemSettings;

use crate::error::{Error, Result};

const LOCAL_CONFIG_FILE_NAME: &str = "sanitas.toml";
const CONFIG_DIR_NAME: &str = "sanitas";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Effective CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level when neither `--verbose` nor `RUST_LOG` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Identifier scheme for metadata references in import payloads.
    pub id_scheme: IdSchemeParam,
    /// System settings handed to the import pipeline.
    pub settings: SystemSettings,
}

impl Config {
    /// Loads configuration from an explicit file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::parse(&content)
    }

    /// Parses and validates TOML configuration.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.log_filter()?;
        Ok(config)
    }

    /// Resolves the configuration for this invocation. Returns the file it
    /// was read from, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let cwd = std::env::current_dir()?;
        let config_dir = dirs::config_dir();
        match find_config(&cwd, config_dir.as_deref()) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Config::default(), None)),
        }
    }

    /// The configured log level, if any.
    pub fn log_filter(&self) -> Result<Option<LevelFilter>> {
        self.log_level
            .as_deref()
            .map(|level| LevelFilter::from_str(level).map_err(|_| Error::InvalidLogLevel(level.to_string())))
            .transpose()
    }

    /// Id schemes for every metadata kind.
    pub fn id_schemes(&self) -> TrackerIdSchemeParams {
        TrackerIdSchemeParams::uniform(self.id_scheme.clone())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Candidate config files, in search order.
pub fn config_candidates(cwd: &Path, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join(LOCAL_CONFIG_FILE_NAME)];
    if let Some(dir) = config_dir {
        candidates.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

/// The first candidate that exists.
pub fn find_config(cwd: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    config_candidates(cwd, config_dir)
        .into_iter()
        .find(|path| path.is_file())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
