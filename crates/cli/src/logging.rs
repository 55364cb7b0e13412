// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup. Logs go to stderr so stdout stays machine readable.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Level used when `RUST_LOG` is unset: `--verbose`, then the config file,
/// then INFO.
pub fn default_level(verbose: bool, config: &Config) -> Result<LevelFilter> {
    if verbose {
        return Ok(LevelFilter::DEBUG);
    }
    Ok(config.log_filter()?.unwrap_or(LevelFilter::INFO))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbose: bool, config: &Config) -> Result<()> {
    let level = default_level(verbose, config)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
