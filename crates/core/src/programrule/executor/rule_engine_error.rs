// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::warn;

use super::{RuleActionExecutor, RuleTarget};
use crate::programrule::issue::{ProgramRuleIssue, ValidationCode};
use crate::tracker::TrackerBundle;

/// Reports a rule that failed to evaluate. Never blocks the import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEngineErrorExecutor {
    rule_uid: String,
    content: String,
}

impl RuleEngineErrorExecutor {
    pub fn new(rule_uid: impl Into<String>, content: impl Into<String>) -> Self {
        RuleEngineErrorExecutor {
            rule_uid: rule_uid.into(),
            content: content.into(),
        }
    }
}

impl RuleActionExecutor for RuleEngineErrorExecutor {
    fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    fn execute_rule_action(&self, _bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue> {
        warn!(rule = %self.rule_uid, uid = target.uid(), error = %self.content, "program rule failed to evaluate");
        Some(ProgramRuleIssue::warning(
            &self.rule_uid,
            ValidationCode::E1300,
            vec![self.rule_uid.clone(), self.content.clone()],
        ))
    }
}

#[cfg(test)]
#[path = "rule_engine_error_tests.rs"]
mod tests;
