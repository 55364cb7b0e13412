// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::{debug, warn};

use super::{is_equal, RuleActionExecutor, RuleTarget};
use crate::programrule::issue::{ProgramRuleIssue, ValidationCode};
use crate::tracker::domain::Attribute;
use crate::tracker::TrackerBundle;

/// Where the current value of an attribute was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Enrollment,
    TrackedEntity,
    Database,
}

/// Assigns a computed value to an enrollment's tracked entity attribute.
///
/// The current value is looked up on the enrollment payload, then on the
/// tracked entity payload, then in the persisted tracked entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignAttributeExecutor {
    rule_uid: String,
    attribute: String,
    value: Option<String>,
    overwrite: bool,
}

impl AssignAttributeExecutor {
    pub fn new(
        rule_uid: impl Into<String>,
        attribute: impl Into<String>,
        value: Option<String>,
        overwrite: bool,
    ) -> Self {
        AssignAttributeExecutor {
            rule_uid: rule_uid.into(),
            attribute: attribute.into(),
            value,
            overwrite,
        }
    }

    fn current_value(&self, bundle: &TrackerBundle, enrollment_uid: &str) -> Option<(Source, String)> {
        let enrollment = bundle.enrollment(enrollment_uid)?;
        if let Some(value) = enrollment
            .attribute(&self.attribute)
            .and_then(|a| a.value.clone())
        {
            return Some((Source::Enrollment, value));
        }

        let te_uid = enrollment.tracked_entity.as_deref()?;
        if let Some(value) = bundle
            .tracked_entity(te_uid)
            .and_then(|te| te.attribute(&self.attribute))
            .and_then(|a| a.value.clone())
        {
            return Some((Source::TrackedEntity, value));
        }

        bundle
            .preheat
            .tracked_entity(te_uid)
            .and_then(|te| te.attribute_value(&self.attribute))
            .map(|value| (Source::Database, value.to_string()))
    }

    fn assign(&self, bundle: &mut TrackerBundle, enrollment_uid: &str, source: Source) {
        let attributes = match source {
            Source::TrackedEntity => {
                let Some(te_uid) = bundle
                    .enrollment(enrollment_uid)
                    .and_then(|e| e.tracked_entity.clone())
                else {
                    return;
                };
                bundle.tracked_entity_mut(&te_uid).map(|te| &mut te.attributes)
            }
            Source::Enrollment | Source::Database => bundle.enrollment_mut(enrollment_uid).map(|e| &mut e.attributes),
        };
        let Some(attributes) = attributes else {
            return;
        };

        match attributes.iter_mut().find(|a| a.attribute == self.attribute) {
            Some(existing) => existing.value = self.value.clone(),
            None => attributes.push(Attribute::new(&self.attribute, self.value.clone())),
        }
    }

    fn assigned(&self, te_uid: &str) -> ProgramRuleIssue {
        ProgramRuleIssue::warning(
            &self.rule_uid,
            ValidationCode::E1310,
            vec![self.rule_uid.clone(), self.attribute.clone(), te_uid.to_string()],
        )
    }
}

impl RuleActionExecutor for AssignAttributeExecutor {
    fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    fn execute_rule_action(&self, bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue> {
        let RuleTarget::Enrollment(enrollment_uid) = target else {
            debug!(rule = %self.rule_uid, uid = target.uid(), "attribute assignment only applies to enrollments");
            return None;
        };
        let Some(enrollment) = bundle.enrollment(enrollment_uid) else {
            warn!(rule = %self.rule_uid, enrollment = enrollment_uid, "enrollment not in bundle");
            return None;
        };
        let te_uid = enrollment
            .tracked_entity
            .clone()
            .unwrap_or_else(|| enrollment_uid.to_string());

        let value_type = bundle
            .preheat
            .tracked_entity_attribute(&self.attribute)
            .map(|a| a.value_type)
            .unwrap_or_default();

        match self.current_value(bundle, enrollment_uid) {
            None => {
                self.assign(bundle, enrollment_uid, Source::Enrollment);
                Some(self.assigned(&te_uid))
            }
            Some((_, current)) if is_equal(Some(current.as_str()), self.value.as_deref(), value_type) => {
                Some(self.assigned(&te_uid))
            }
            Some((source, _)) if self.overwrite => {
                debug!(rule = %self.rule_uid, attribute = %self.attribute, ?source, "overwriting attribute");
                self.assign(bundle, enrollment_uid, source);
                Some(self.assigned(&te_uid))
            }
            Some(_) => Some(ProgramRuleIssue::error(
                &self.rule_uid,
                ValidationCode::E1309,
                vec![
                    self.rule_uid.clone(),
                    self.attribute.clone(),
                    self.value.clone().unwrap_or_default(),
                ],
            )),
        }
    }
}

#[cfg(test)]
#[path = "assign_attribute_tests.rs"]
mod tests;
