// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kind of shareable object held in an `--object` fixture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ObjectKind {
    /// Any shareable object: `{"type", "uid", "sharing"}`
    #[default]
    Object,
    /// A category option with its own sharing
    CategoryOption,
    /// A category option combo, gated by its options
    CategoryOptionCombo,
}

/// Import strategy accepted by `sanitas import`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Create,
    Update,
    #[default]
    CreateAndUpdate,
    Delete,
}

#[derive(Parser)]
#[command(name = "sanitas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sharing decisions, tracker import and program rules from JSON fixtures")]
#[command(
    long_about = "Sharing decisions, tracker import and program rules from JSON fixtures.\n\n\
    Every command reads its inputs from JSON files and prints JSON to stdout."
)]
pub struct Cli {
    /// Read configuration from <path> instead of searching for it
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute what a user may do with an object
    #[command(after_help = "\
Examples:
  sanitas access --schemas schemas.json --user user.json --object program.json
  sanitas access --schemas schemas.json --user user.json --object combo.json --kind category-option-combo")]
    Access {
        /// JSON array of schemas
        #[arg(long, value_name = "file")]
        schemas: PathBuf,

        /// JSON user; omit to evaluate for no user
        #[arg(long, value_name = "file")]
        user: Option<PathBuf>,

        /// JSON shareable object
        #[arg(long, value_name = "file")]
        object: PathBuf,

        /// How to read the object fixture
        #[arg(long, value_enum, default_value_t)]
        kind: ObjectKind,
    },

    /// Report sharing configuration violations on an object
    #[command(name = "verify-sharing")]
    VerifySharing {
        /// JSON array of schemas
        #[arg(long, value_name = "file")]
        schemas: PathBuf,

        /// JSON user; omit to verify for no user
        #[arg(long, value_name = "file")]
        user: Option<PathBuf>,

        /// JSON shareable object
        #[arg(long, value_name = "file")]
        object: PathBuf,
    },

    /// Run program rules over a payload and convert it for persistence
    #[command(after_help = "\
Examples:
  sanitas import --preheat preheat.json --payload payload.json
  sanitas import --preheat preheat.json --payload payload.json --effects effects.json")]
    Import {
        /// JSON preheat snapshot: metadata, persisted entities, current user
        #[arg(long, value_name = "file")]
        preheat: PathBuf,

        /// JSON tracker payload
        #[arg(long, value_name = "file")]
        payload: PathBuf,

        /// JSON array of rule effects per entity
        #[arg(long, value_name = "file")]
        effects: Option<PathBuf>,

        /// Import strategy
        #[arg(long, value_enum, default_value_t)]
        strategy: StrategyArg,
    },

    /// Classify notification triggers and check templates
    Notifications {
        /// Only this trigger, e.g. SCHEDULED_DAYS_DUE_DATE
        #[arg(long)]
        trigger: Option<String>,

        /// JSON array of notification templates to validate
        #[arg(long, value_name = "file")]
        templates: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}
