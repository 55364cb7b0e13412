// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Prints the effective configuration as TOML, preceded by its source.
pub fn run(config: &Config, source: Option<&Path>) -> Result<()> {
    match source {
        Some(path) => println!("# {}", path.display()),
        None => println!("# defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
