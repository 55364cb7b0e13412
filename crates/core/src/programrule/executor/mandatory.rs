// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::debug;

use super::{RuleActionExecutor, RuleTarget};
use crate::programrule::issue::{ProgramRuleIssue, ValidationCode};
use crate::tracker::converter::render;
use crate::tracker::TrackerBundle;

/// A field a rule makes mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MandatoryField {
    /// Tracked entity attribute uid, checked on enrollments.
    Attribute(String),
    /// Data element uid, checked on events.
    DataElement(String),
}

/// What the payload says about a field.
enum Presence {
    Provided,
    Deleted,
    Absent,
}

/// Requires a value for a field. A value persisted earlier satisfies the
/// requirement, an explicit deletion never does. Entities being deleted are
/// not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMandatoryFieldExecutor {
    rule_uid: String,
    field: MandatoryField,
}

impl SetMandatoryFieldExecutor {
    pub fn new(rule_uid: impl Into<String>, field: MandatoryField) -> Self {
        SetMandatoryFieldExecutor {
            rule_uid: rule_uid.into(),
            field,
        }
    }

    /// Enrollment payload first, then the tracked entity payload.
    fn attribute_presence(bundle: &TrackerBundle, enrollment_uid: &str, attribute: &str) -> (Presence, bool) {
        let Some(enrollment) = bundle.enrollment(enrollment_uid) else {
            return (Presence::Absent, false);
        };
        let te_uid = enrollment.tracked_entity.as_deref();

        let payload = enrollment.attribute(attribute).or_else(|| {
            te_uid
                .and_then(|uid| bundle.tracked_entity(uid))
                .and_then(|te| te.attribute(attribute))
        });
        let presence = match payload {
            Some(a) if a.value.as_deref().is_some_and(|v| !v.is_empty()) => Presence::Provided,
            Some(_) => Presence::Deleted,
            None => Presence::Absent,
        };
        let stored = te_uid
            .and_then(|uid| bundle.preheat.tracked_entity(uid))
            .and_then(|te| te.attribute_value(attribute))
            .is_some_and(|v| !v.is_empty());

        (presence, stored)
    }

    fn data_element_presence(bundle: &TrackerBundle, event_uid: &str, data_element: &str) -> (Presence, bool) {
        let Some(event) = bundle.event(event_uid) else {
            return (Presence::Absent, false);
        };
        let preheat = &bundle.preheat;
        let identifier = render(
            preheat.data_element_by_uid(data_element),
            preheat.id_schemes().data_element(),
            data_element,
        );

        let presence = match event.data_values.iter().find(|dv| dv.data_element == identifier) {
            Some(dv) if dv.value.as_deref().is_some_and(|v| !v.is_empty()) => Presence::Provided,
            Some(_) => Presence::Deleted,
            None => Presence::Absent,
        };
        let stored = preheat
            .event(event_uid)
            .and_then(|e| e.data_value(data_element))
            .and_then(|dv| dv.value.as_deref())
            .is_some_and(|v| !v.is_empty());

        (presence, stored)
    }
}

impl RuleActionExecutor for SetMandatoryFieldExecutor {
    fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    fn execute_rule_action(&self, bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue> {
        if bundle.strategy(target.tracker_type(), target.uid()).is_delete() {
            debug!(rule = %self.rule_uid, uid = target.uid(), "mandatory field skipped for deletion");
            return None;
        }

        let (field, presence, stored, missing) = match (&self.field, target) {
            (MandatoryField::Attribute(attribute), RuleTarget::Enrollment(uid)) => {
                let (presence, stored) = Self::attribute_presence(bundle, uid, attribute);
                (attribute, presence, stored, ValidationCode::E1306)
            }
            (MandatoryField::DataElement(data_element), RuleTarget::Event(uid)) => {
                let (presence, stored) = Self::data_element_presence(bundle, uid, data_element);
                (data_element, presence, stored, ValidationCode::E1301)
            }
            (field, target) => {
                debug!(rule = %self.rule_uid, ?field, uid = target.uid(), "mandatory field does not apply to target");
                return None;
            }
        };

        let code = match presence {
            Presence::Provided => return None,
            Presence::Deleted => ValidationCode::E1317,
            Presence::Absent if stored => return None,
            Presence::Absent => missing,
        };
        debug!(rule = %self.rule_uid, uid = target.uid(), field = %field, code = %code, "mandatory field missing");
        Some(ProgramRuleIssue::error(
            &self.rule_uid,
            code,
            vec![self.rule_uid.clone(), field.clone()],
        ))
    }
}

#[cfg(test)]
#[path = "mandatory_tests.rs"]
mod tests;
