// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use std::path::Path;

use sanitas_core::{NotificationTemplate, NotificationTrigger};

use crate::error::Result;
use crate::fixtures::{self, read_json};

/// How a trigger is scheduled and which entities it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerClassification {
    pub trigger: NotificationTrigger,
    pub immediate: bool,
    pub scheduled: bool,
    pub applicable_to_enrollment: bool,
    pub applicable_to_event: bool,
}

impl From<NotificationTrigger> for TriggerClassification {
    fn from(trigger: NotificationTrigger) -> Self {
        TriggerClassification {
            trigger,
            immediate: trigger.is_immediate(),
            scheduled: trigger.is_scheduled(),
            applicable_to_enrollment: trigger.is_applicable_to_enrollment(),
            applicable_to_event: trigger.is_applicable_to_event(),
        }
    }
}

/// Outcome of validating one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCheck {
    pub uid: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsOutput {
    pub triggers: Vec<TriggerClassification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<TemplateCheck>,
}

pub fn run(trigger: Option<&str>, templates: Option<&Path>) -> Result<()> {
    let templates: Vec<NotificationTemplate> = templates.map(read_json).transpose()?.unwrap_or_default();
    let output = classify(trigger, &templates)?;
    fixtures::print_json(&output)
}

pub(crate) fn classify(trigger: Option<&str>, templates: &[NotificationTemplate]) -> Result<NotificationsOutput> {
    let triggers = match trigger {
        Some(raw) => vec![raw.parse::<NotificationTrigger>()?],
        None => NotificationTrigger::ALL.to_vec(),
    };

    let templates = templates
        .iter()
        .map(|template| {
            let error = template.validate().err().map(|e| e.to_string());
            if let Some(reason) = &error {
                tracing::warn!(uid = %template.uid, "invalid notification template: {reason}");
            }
            TemplateCheck {
                uid: template.uid.clone(),
                valid: error.is_none(),
                error,
            }
        })
        .collect();

    Ok(NotificationsOutput {
        triggers: triggers.into_iter().map(TriggerClassification::from).collect(),
        templates,
    })
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
