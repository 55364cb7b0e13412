// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::debug;

use super::{RuleActionExecutor, RuleTarget};
use crate::programrule::issue::{IssueType, ProgramRuleIssue, ValidationCode};
use crate::tracker::{EnrollmentStatus, EventStatus, TrackerBundle};

/// Shows a rule message as a warning or error, optionally only when the
/// target is being completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowMessageExecutor {
    rule_uid: String,
    issue_type: IssueType,
    on_complete: bool,
    content: String,
    data: Option<String>,
}

impl ShowMessageExecutor {
    pub fn new(
        rule_uid: impl Into<String>,
        issue_type: IssueType,
        on_complete: bool,
        content: impl Into<String>,
        data: Option<String>,
    ) -> Self {
        ShowMessageExecutor {
            rule_uid: rule_uid.into(),
            issue_type,
            on_complete,
            content: content.into(),
            data,
        }
    }

    fn message(&self) -> String {
        match self.data.as_deref().filter(|d| !d.is_empty()) {
            Some(data) => format!("{} {}", self.content, data),
            None => self.content.clone(),
        }
    }

    fn is_completed(bundle: &TrackerBundle, target: RuleTarget<'_>) -> bool {
        match target {
            RuleTarget::Enrollment(uid) => bundle
                .enrollment(uid)
                .is_some_and(|e| e.status == EnrollmentStatus::Completed),
            RuleTarget::Event(uid) => bundle
                .event(uid)
                .is_some_and(|e| e.status == EventStatus::Completed),
        }
    }
}

impl RuleActionExecutor for ShowMessageExecutor {
    fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    fn execute_rule_action(&self, bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue> {
        if self.on_complete && !Self::is_completed(bundle, target) {
            debug!(rule = %self.rule_uid, uid = target.uid(), "target not completed, message suppressed");
            return None;
        }

        let args = vec![self.rule_uid.clone(), self.message()];
        Some(ProgramRuleIssue::new(self.issue_type, &self.rule_uid, ValidationCode::E1300, args))
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
