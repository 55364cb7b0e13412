// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule effects computed by the rule engine, ready to be applied.

use serde::{Deserialize, Serialize};

use crate::tracker::TrackerType;

/// What a fired rule asks the import to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum RuleAction {
    AssignAttribute { attribute: String },
    AssignDataValue { data_element: String },
    SetMandatoryAttribute { attribute: String },
    SetMandatoryDataElement { data_element: String },
    ShowError { content: String },
    ShowWarning { content: String },
    ShowErrorOnComplete { content: String },
    ShowWarningOnComplete { content: String },
    /// The rule expression could not be evaluated.
    RuleEngineError { content: String },
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::AssignAttribute { .. } => "ASSIGN_ATTRIBUTE",
            RuleAction::AssignDataValue { .. } => "ASSIGN_DATA_VALUE",
            RuleAction::SetMandatoryAttribute { .. } => "SET_MANDATORY_ATTRIBUTE",
            RuleAction::SetMandatoryDataElement { .. } => "SET_MANDATORY_DATA_ELEMENT",
            RuleAction::ShowError { .. } => "SHOW_ERROR",
            RuleAction::ShowWarning { .. } => "SHOW_WARNING",
            RuleAction::ShowErrorOnComplete { .. } => "SHOW_ERROR_ON_COMPLETE",
            RuleAction::ShowWarningOnComplete { .. } => "SHOW_WARNING_ON_COMPLETE",
            RuleAction::RuleEngineError { .. } => "RULE_ENGINE_ERROR",
        }
    }
}

/// One fired rule. `data` carries the computed value or message suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEffect {
    pub rule_uid: String,
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RuleEffect {
    pub fn new(rule_uid: impl Into<String>, action: RuleAction, data: Option<String>) -> Self {
        RuleEffect {
            rule_uid: rule_uid.into(),
            action,
            data,
        }
    }
}

/// All effects that fired for one enrollment or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEffects {
    pub tracker_type: TrackerType,
    pub uid: String,
    #[serde(default)]
    pub effects: Vec<RuleEffect>,
}

impl RuleEffects {
    pub fn enrollment(uid: impl Into<String>, effects: Vec<RuleEffect>) -> Self {
        RuleEffects {
            tracker_type: TrackerType::Enrollment,
            uid: uid.into(),
            effects,
        }
    }

    pub fn event(uid: impl Into<String>, effects: Vec<RuleEffect>) -> Self {
        RuleEffects {
            tracker_type: TrackerType::Event,
            uid: uid.into(),
            effects,
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
