// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sanitasrs - command-line front end for sanitas-core.
//!
//! Every command loads JSON fixtures, drives the core library and prints
//! JSON to stdout.
//!
//! # Main Components
//!
//! - [`Cli`] - argument parsing
//! - [`Config`] - TOML configuration (id scheme, system settings, log level)
//! - [`Error`] - Error types for all operations

mod cli;
mod commands;
mod fixtures;
mod logging;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, ObjectKind, StrategyArg};
pub use config::Config;
pub use error::{Error, Result};

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let (config, source) = Config::discover(cli.config.as_deref())?;
    logging::init(cli.verbose, &config)?;
    if let Some(path) = &source {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Access {
            schemas,
            user,
            object,
            kind,
        } => commands::access::run(&schemas, user.as_deref(), &object, kind),
        Command::VerifySharing { schemas, user, object } => {
            commands::verify_sharing::run(&schemas, user.as_deref(), &object)
        }
        Command::Import {
            preheat,
            payload,
            effects,
            strategy,
        } => commands::import::run(&config, &preheat, &payload, effects.as_deref(), strategy),
        Command::Notifications { trigger, templates } => {
            commands::notifications::run(trigger.as_deref(), templates.as_deref())
        }
        Command::Config => commands::config::run(&config, source.as_deref()),
    }
}
