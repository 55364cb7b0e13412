// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::{debug, warn};

use super::{is_equal, RuleActionExecutor, RuleTarget};
use crate::programrule::issue::{ProgramRuleIssue, ValidationCode};
use crate::tracker::converter::render;
use crate::tracker::domain::DataValue;
use crate::tracker::TrackerBundle;

/// Assigns a computed value to an event data value. Only applies when the
/// event's program stage collects the data element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignDataValueExecutor {
    rule_uid: String,
    data_element: String,
    value: Option<String>,
    overwrite: bool,
}

impl AssignDataValueExecutor {
    pub fn new(
        rule_uid: impl Into<String>,
        data_element: impl Into<String>,
        value: Option<String>,
        overwrite: bool,
    ) -> Self {
        AssignDataValueExecutor {
            rule_uid: rule_uid.into(),
            data_element: data_element.into(),
            value,
            overwrite,
        }
    }

    /// The data element as payloads reference it under the configured scheme.
    fn payload_identifier(&self, bundle: &TrackerBundle) -> String {
        let preheat = &bundle.preheat;
        render(
            preheat.data_element_by_uid(&self.data_element),
            preheat.id_schemes().data_element(),
            &self.data_element,
        )
    }

    fn assign(&self, bundle: &mut TrackerBundle, event_uid: &str, identifier: &str) {
        let Some(event) = bundle.event_mut(event_uid) else {
            return;
        };
        match event
            .data_values
            .iter_mut()
            .find(|dv| dv.data_element == identifier)
        {
            Some(existing) => existing.value = self.value.clone(),
            None => event
                .data_values
                .push(DataValue::new(identifier, self.value.clone())),
        }
    }

    fn assigned(&self, event_uid: &str) -> ProgramRuleIssue {
        ProgramRuleIssue::warning(
            &self.rule_uid,
            ValidationCode::E1308,
            vec![self.rule_uid.clone(), self.data_element.clone(), event_uid.to_string()],
        )
    }
}

impl RuleActionExecutor for AssignDataValueExecutor {
    fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    fn execute_rule_action(&self, bundle: &mut TrackerBundle, target: RuleTarget<'_>) -> Option<ProgramRuleIssue> {
        let RuleTarget::Event(event_uid) = target else {
            debug!(rule = %self.rule_uid, uid = target.uid(), "data value assignment only applies to events");
            return None;
        };
        let Some(event) = bundle.event(event_uid) else {
            warn!(rule = %self.rule_uid, event = event_uid, "event not in bundle");
            return None;
        };

        let preheat = &bundle.preheat;
        let in_stage = preheat
            .resolve_program_stage(&event.program_stage)
            .is_some_and(|stage| stage.contains_data_element(&self.data_element));
        if !in_stage {
            debug!(rule = %self.rule_uid, event = event_uid, data_element = %self.data_element, "data element not in program stage");
            return None;
        }

        let identifier = self.payload_identifier(bundle);
        let current = event
            .data_values
            .iter()
            .find(|dv| dv.data_element == identifier)
            .and_then(|dv| dv.value.clone())
            .or_else(|| {
                preheat
                    .event(event_uid)
                    .and_then(|stored| stored.data_value(&self.data_element))
                    .and_then(|dv| dv.value.clone())
            });
        let value_type = preheat
            .data_element_by_uid(&self.data_element)
            .map(|de| de.value_type)
            .unwrap_or_default();

        match current {
            None => {
                self.assign(bundle, event_uid, &identifier);
                Some(self.assigned(event_uid))
            }
            Some(current) if is_equal(Some(current.as_str()), self.value.as_deref(), value_type) => {
                Some(self.assigned(event_uid))
            }
            Some(_) if self.overwrite => {
                debug!(rule = %self.rule_uid, data_element = %self.data_element, "overwriting data value");
                self.assign(bundle, event_uid, &identifier);
                Some(self.assigned(event_uid))
            }
            Some(_) => Some(ProgramRuleIssue::error(
                &self.rule_uid,
                ValidationCode::E1307,
                vec![
                    self.rule_uid.clone(),
                    self.data_element.clone(),
                    self.value.clone().unwrap_or_default(),
                ],
            )),
        }
    }
}

#[cfg(test)]
#[path = "assign_data_value_tests.rs"]
mod tests;
