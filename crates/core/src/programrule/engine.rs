// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::effect::RuleEffects;
use super::executor::{executor_for, RuleTarget};
use super::issue::{IssueType, ProgramRuleIssue};
use crate::settings::SystemSettings;
use crate::tracker::{TrackerBundle, TrackerType};

/// Issues raised against one entity, in effect order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityIssues {
    pub tracker_type: TrackerType,
    pub uid: String,
    pub issues: Vec<ProgramRuleIssue>,
}

/// Outcome of applying rule effects to a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEngineReport {
    pub entities: Vec<EntityIssues>,
    /// Uids of entities with at least one ERROR issue.
    pub rejected: BTreeSet<String>,
}

impl RuleEngineReport {
    pub fn issues(&self, uid: &str) -> &[ProgramRuleIssue] {
        self.entities
            .iter()
            .find(|e| e.uid == uid)
            .map(|e| e.issues.as_slice())
            .unwrap_or_default()
    }

    pub fn is_rejected(&self, uid: &str) -> bool {
        self.rejected.contains(uid)
    }

    pub fn count(&self, issue_type: IssueType) -> usize {
        self.entities
            .iter()
            .flat_map(|e| &e.issues)
            .filter(|i| i.issue_type == issue_type)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Runs effects entity by entity, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramRuleEngine {
    settings: SystemSettings,
}

impl ProgramRuleEngine {
    pub fn new(settings: SystemSettings) -> Self {
        ProgramRuleEngine { settings }
    }

    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    pub fn execute(&self, bundle: &mut TrackerBundle, effects: &[RuleEffects]) -> RuleEngineReport {
        let mut report = RuleEngineReport::default();

        for entity in effects {
            let Some(target) = RuleTarget::of(entity.tracker_type, &entity.uid) else {
                warn!(tracker_type = %entity.tracker_type, uid = %entity.uid, "rule effects only apply to enrollments and events");
                continue;
            };

            let issues: Vec<ProgramRuleIssue> = entity
                .effects
                .iter()
                .filter_map(|effect| {
                    let executor = executor_for(effect, &self.settings);
                    debug!(rule = executor.rule_uid(), action = effect.action.as_str(), uid = %entity.uid, "executing rule action");
                    executor.execute_rule_action(bundle, target)
                })
                .collect();

            if issues.is_empty() {
                continue;
            }
            if issues.iter().any(ProgramRuleIssue::is_error) {
                report.rejected.insert(entity.uid.clone());
            }
            match report.entities.iter_mut().find(|e| e.uid == entity.uid) {
                Some(existing) => existing.issues.extend(issues),
                None => report.entities.push(EntityIssues {
                    tracker_type: entity.tracker_type,
                    uid: entity.uid.clone(),
                    issues,
                }),
            }
        }

        info!(
            entities = report.entities.len(),
            errors = report.count(IssueType::Error),
            warnings = report.count(IssueType::Warning),
            rejected = report.rejected.len(),
            "program rules applied"
        );
        report
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
