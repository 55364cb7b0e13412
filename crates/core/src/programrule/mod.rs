// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Applies program rule effects to an import bundle.
//!
//! Effects are computed upstream by the rule engine. This module only
//! interprets them: assignments mutate the bundle, validations produce
//! [`ProgramRuleIssue`]s, and any ERROR rejects its entity.

pub mod effect;
pub mod engine;
pub mod executor;
pub mod issue;

pub use effect::{RuleAction, RuleEffect, RuleEffects};
pub use engine::{EntityIssues, ProgramRuleEngine, RuleEngineReport};
pub use executor::{RuleActionExecutor, RuleTarget};
pub use issue::{IssueType, ProgramRuleIssue, ValidationCode};
