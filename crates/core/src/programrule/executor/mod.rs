// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One executor per rule action.
//!
//! Executors read the in-flight payload first and fall back to the
//! persisted state in the preheat. Assign executors write back into the
//! bundle. An executor that does not apply to its target returns `None`.

mod assign_attribute;
mod assign_data_value;
mod mandatory;
mod message;
mod rule_engine_error;

pub use assign_attribute::AssignAttributeExecutor;
pub use assign_data_value::AssignDataValueExecutor;
pub use mandatory::{MandatoryField, SetMandatoryFieldExecutor};
pub use message::ShowMessageExecutor;
pub use rule_engine_error::RuleEngineErrorExecutor;

use crate::programrule::effect::{RuleAction, RuleEffect};
use crate::programrule::issue::{IssueType, ProgramRuleIssue};
use crate::settings::SystemSettings;
use crate::tracker::metadata::ValueType;
use crate::tracker::{TrackerBundle, TrackerType};

/// The entity a rule effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget<'a> {
    Enrollment(&'a str),
    Event(&'a str),
}

impl<'a> RuleTarget<'a> {
    /// Only enrollments and events carry rule effects.
    pub fn of(tracker_type: TrackerType, uid: &'a str) -> Option<Self> {
        match tracker_type {
            TrackerType::Enrollment => Some(RuleTarget::Enrollment(uid)),
            TrackerType::Event => Some(RuleTarget::Event(uid)),
            TrackerType::TrackedEntity | TrackerType::Relationship => None,
        }
    }

    pub fn uid(&self) -> &'a str {
        match self {
            RuleTarget::Enrollment(uid) | RuleTarget::Event(uid) => uid,
        }
    }

    pub fn tracker_type(&self) -> TrackerType {
        match self {
            RuleTarget::Enrollment(_) => TrackerType::Enrollment,
            RuleTarget::Event(_) => TrackerType::Event,
        }
    }
}

/// Applies one rule action to one entity of the bundle.
pub trait RuleActionExecutor {
    fn rule_uid(&self) -> &str;

    fn execute_rule_action(&self, bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue>;
}

/// Builds the executor for an effect.
pub fn executor_for(effect: &RuleEffect, settings: &SystemSettings) -> Box<dyn RuleActionExecutor> {
    let rule_uid = effect.rule_uid.clone();
    let data = effect.data.clone();
    let overwrite = settings.rule_engine_assign_overwrite;

    match &effect.action {
        RuleAction::AssignAttribute { attribute } => {
            Box::new(AssignAttributeExecutor::new(rule_uid, attribute.clone(), data, overwrite))
        }
        RuleAction::AssignDataValue { data_element } => {
            Box::new(AssignDataValueExecutor::new(rule_uid, data_element.clone(), data, overwrite))
        }
        RuleAction::SetMandatoryAttribute { attribute } => Box::new(SetMandatoryFieldExecutor::new(
            rule_uid,
            MandatoryField::Attribute(attribute.clone()),
        )),
        RuleAction::SetMandatoryDataElement { data_element } => Box::new(SetMandatoryFieldExecutor::new(
            rule_uid,
            MandatoryField::DataElement(data_element.clone()),
        )),
        RuleAction::ShowError { content } => Box::new(ShowMessageExecutor::new(
            rule_uid,
            IssueType::Error,
            false,
            content.clone(),
            data,
        )),
        RuleAction::ShowWarning { content } => Box::new(ShowMessageExecutor::new(
            rule_uid,
            IssueType::Warning,
            false,
            content.clone(),
            data,
        )),
        RuleAction::ShowErrorOnComplete { content } => Box::new(ShowMessageExecutor::new(
            rule_uid,
            IssueType::Error,
            true,
            content.clone(),
            data,
        )),
        RuleAction::ShowWarningOnComplete { content } => Box::new(ShowMessageExecutor::new(
            rule_uid,
            IssueType::Warning,
            true,
            content.clone(),
            data,
        )),
        RuleAction::RuleEngineError { content } => Box::new(RuleEngineErrorExecutor::new(rule_uid, content.clone())),
    }
}

/// Compares a provided value with a computed one. Numeric types compare by
/// value, so `23` equals `23.0`. A missing side never matches.
pub fn is_equal(provided: Option<&str>, computed: Option<&str>, value_type: ValueType) -> bool {
    match (provided, computed) {
        (Some(a), Some(b)) if value_type.is_numeric() => {
            match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            }
        }
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
