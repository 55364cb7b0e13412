// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in the sanitas CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sanitas_core::Error),

    #[error("fixture not found: {}\n  hint: pass an existing JSON file", .0.display())]
    FixtureNotFound(PathBuf),

    #[error("invalid fixture {}: {source}", path.display())]
    InvalidFixture {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid log level '{0}'\n  hint: valid levels are: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

/// A specialized Result type for sanitas CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
