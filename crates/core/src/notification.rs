// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Program notification classification and scheduling.
//!
//! Triggers are classified as immediate or scheduled and by the entity
//! kind they apply to. Scheduled templates fire a fixed number of days
//! after an anchor date of the enrollment or event. Delivery is left to
//! the caller.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tracker::model::{Enrollment, Event};
use crate::tracker::{EnrollmentStatus, EventStatus};

/// What causes a program notification to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationTrigger {
    Enrollment,
    Completion,
    ProgramRule,
    ScheduledDaysDueDate,
    ScheduledDaysIncidentDate,
    ScheduledDaysEnrollmentDate,
}

impl NotificationTrigger {
    pub const ALL: [NotificationTrigger; 6] = [
        NotificationTrigger::Enrollment,
        NotificationTrigger::Completion,
        NotificationTrigger::ProgramRule,
        NotificationTrigger::ScheduledDaysDueDate,
        NotificationTrigger::ScheduledDaysIncidentDate,
        NotificationTrigger::ScheduledDaysEnrollmentDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationTrigger::Enrollment => "ENROLLMENT",
            NotificationTrigger::Completion => "COMPLETION",
            NotificationTrigger::ProgramRule => "PROGRAM_RULE",
            NotificationTrigger::ScheduledDaysDueDate => "SCHEDULED_DAYS_DUE_DATE",
            NotificationTrigger::ScheduledDaysIncidentDate => "SCHEDULED_DAYS_INCIDENT_DATE",
            NotificationTrigger::ScheduledDaysEnrollmentDate => "SCHEDULED_DAYS_ENROLLMENT_DATE",
        }
    }

    /// Sent as soon as the triggering action happens.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            NotificationTrigger::Enrollment | NotificationTrigger::Completion | NotificationTrigger::ProgramRule
        )
    }

    /// Sent by the daily scheduler relative to an anchor date.
    pub fn is_scheduled(&self) -> bool {
        !self.is_immediate()
    }

    pub fn is_applicable_to_enrollment(&self) -> bool {
        !matches!(self, NotificationTrigger::ScheduledDaysDueDate)
    }

    pub fn is_applicable_to_event(&self) -> bool {
        matches!(
            self,
            NotificationTrigger::Completion
                | NotificationTrigger::ProgramRule
                | NotificationTrigger::ScheduledDaysDueDate
        )
    }

    /// Scheduled triggers anchored on an enrollment date.
    pub fn is_enrollment_scheduled(&self) -> bool {
        self.is_scheduled() && self.is_applicable_to_enrollment()
    }

    /// Scheduled triggers anchored on an event date.
    pub fn is_event_scheduled(&self) -> bool {
        self.is_scheduled() && self.is_applicable_to_event()
    }

    pub fn immediate() -> impl Iterator<Item = NotificationTrigger> {
        Self::ALL.into_iter().filter(NotificationTrigger::is_immediate)
    }

    pub fn scheduled() -> impl Iterator<Item = NotificationTrigger> {
        Self::ALL.into_iter().filter(NotificationTrigger::is_scheduled)
    }

    pub fn applicable_to_enrollment() -> impl Iterator<Item = NotificationTrigger> {
        Self::ALL
            .into_iter()
            .filter(NotificationTrigger::is_applicable_to_enrollment)
    }

    pub fn applicable_to_event() -> impl Iterator<Item = NotificationTrigger> {
        Self::ALL
            .into_iter()
            .filter(NotificationTrigger::is_applicable_to_event)
    }
}

impl fmt::Display for NotificationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationTrigger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| Error::InvalidNotificationTrigger(s.to_string()))
    }
}

/// Who receives a program notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramNotificationRecipient {
    TrackedEntityInstance,
    OrganisationUnitContact,
    UsersAtOrganisationUnit,
    UserGroup,
    ProgramAttribute,
    DataElement,
    WebHook,
}

impl ProgramNotificationRecipient {
    pub const ALL: [ProgramNotificationRecipient; 7] = [
        ProgramNotificationRecipient::TrackedEntityInstance,
        ProgramNotificationRecipient::OrganisationUnitContact,
        ProgramNotificationRecipient::UsersAtOrganisationUnit,
        ProgramNotificationRecipient::UserGroup,
        ProgramNotificationRecipient::ProgramAttribute,
        ProgramNotificationRecipient::DataElement,
        ProgramNotificationRecipient::WebHook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramNotificationRecipient::TrackedEntityInstance => "TRACKED_ENTITY_INSTANCE",
            ProgramNotificationRecipient::OrganisationUnitContact => "ORGANISATION_UNIT_CONTACT",
            ProgramNotificationRecipient::UsersAtOrganisationUnit => "USERS_AT_ORGANISATION_UNIT",
            ProgramNotificationRecipient::UserGroup => "USER_GROUP",
            ProgramNotificationRecipient::ProgramAttribute => "PROGRAM_ATTRIBUTE",
            ProgramNotificationRecipient::DataElement => "DATA_ELEMENT",
            ProgramNotificationRecipient::WebHook => "WEB_HOOK",
        }
    }

    /// Delivered by SMS or email to an address held in the data, rather
    /// than as an internal message to system users.
    pub fn is_external_recipient(&self) -> bool {
        matches!(
            self,
            ProgramNotificationRecipient::TrackedEntityInstance
                | ProgramNotificationRecipient::OrganisationUnitContact
                | ProgramNotificationRecipient::ProgramAttribute
                | ProgramNotificationRecipient::DataElement
        )
    }
}

impl fmt::Display for ProgramNotificationRecipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProgramNotificationRecipient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| Error::InvalidNotificationRecipient(s.to_string()))
    }
}

/// A program notification template as far as scheduling is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    pub notification_trigger: NotificationTrigger,
    pub notification_recipient: ProgramNotificationRecipient,
    /// Days after the anchor date. Negative values fire before it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_scheduled_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_user_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_program_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_data_element: Option<String>,
}

impl NotificationTemplate {
    pub fn new(
        uid: impl Into<String>,
        notification_trigger: NotificationTrigger,
        notification_recipient: ProgramNotificationRecipient,
    ) -> Self {
        NotificationTemplate {
            uid: uid.into(),
            name: String::new(),
            notification_trigger,
            notification_recipient,
            relative_scheduled_days: None,
            recipient_user_group: None,
            recipient_program_attribute: None,
            recipient_data_element: None,
        }
    }

    pub fn with_relative_scheduled_days(mut self, days: i64) -> Self {
        self.relative_scheduled_days = Some(days);
        self
    }

    /// Checks that the fields required by the trigger and recipient are set.
    pub fn validate(&self) -> Result<()> {
        if self.notification_trigger.is_scheduled() && self.relative_scheduled_days.is_none() {
            return Err(self.invalid(format!(
                "trigger {} requires relativeScheduledDays",
                self.notification_trigger
            )));
        }

        let reference = match self.notification_recipient {
            ProgramNotificationRecipient::UserGroup => Some(("recipientUserGroup", &self.recipient_user_group)),
            ProgramNotificationRecipient::ProgramAttribute => {
                Some(("recipientProgramAttribute", &self.recipient_program_attribute))
            }
            ProgramNotificationRecipient::DataElement => Some(("recipientDataElement", &self.recipient_data_element)),
            _ => None,
        };
        if let Some((field, value)) = reference {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(self.invalid(format!(
                    "recipient {} requires {field}",
                    self.notification_recipient
                )));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidInput(format!("notification template {}: {reason}", self.uid))
    }

    /// When this template fires for an enrollment, if it is scheduled on
    /// one of its dates. Only active enrollments are notified.
    pub fn scheduled_date_for_enrollment(&self, enrollment: &Enrollment) -> Option<DateTime<Utc>> {
        if enrollment.deleted || enrollment.status != EnrollmentStatus::Active {
            return None;
        }
        let anchor = match self.notification_trigger {
            NotificationTrigger::ScheduledDaysEnrollmentDate => enrollment.enrollment_date,
            NotificationTrigger::ScheduledDaysIncidentDate => enrollment.incident_date,
            _ => None,
        }?;
        self.offset(anchor)
    }

    /// When this template fires for an event. Only events still waiting
    /// to happen are notified.
    pub fn scheduled_date_for_event(&self, event: &Event) -> Option<DateTime<Utc>> {
        if self.notification_trigger != NotificationTrigger::ScheduledDaysDueDate
            || event.deleted
            || event.status == EventStatus::Skipped
            || event.occurred_date.is_some()
        {
            return None;
        }
        self.offset(event.scheduled_date?)
    }

    /// The enrollment is notified on `day`.
    pub fn is_due_for_enrollment(&self, enrollment: &Enrollment, day: NaiveDate) -> bool {
        self.scheduled_date_for_enrollment(enrollment)
            .is_some_and(|at| at.date_naive() == day)
    }

    /// The event is notified on `day`.
    pub fn is_due_for_event(&self, event: &Event, day: NaiveDate) -> bool {
        self.scheduled_date_for_event(event)
            .is_some_and(|at| at.date_naive() == day)
    }

    fn offset(&self, anchor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = self.relative_scheduled_days?;
        anchor.checked_add_signed(Duration::try_days(days)?)
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
