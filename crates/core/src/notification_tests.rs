// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap()
}

fn enrollment(status: EnrollmentStatus) -> Enrollment {
    let created = at(2026, 1, 1);
    Enrollment {
        uid: "Enrollmt001".into(),
        tracked_entity: Some("TrackEnt001".into()),
        program: "Program0001".into(),
        organisation_unit: "OrgUnit0001".into(),
        status,
        enrollment_date: Some(at(2026, 3, 1)),
        incident_date: Some(at(2026, 2, 20)),
        completed_date: None,
        completed_by: None,
        stored_by: None,
        follow_up: false,
        deleted: false,
        created,
        last_updated: created,
        created_at_client: None,
        last_updated_at_client: None,
        created_by_user_info: None,
        last_updated_by_user_info: None,
        notes: Vec::new(),
    }
}

fn event(status: EventStatus) -> Event {
    let created = at(2026, 1, 1);
    Event {
        uid: "EventUid001".into(),
        enrollment: Some("Enrollmt001".into()),
        program_stage: "ProgStg0001".into(),
        organisation_unit: "OrgUnit0001".into(),
        attribute_option_combo: None,
        status,
        occurred_date: None,
        scheduled_date: Some(at(2026, 4, 10)),
        completed_date: None,
        completed_by: None,
        stored_by: None,
        deleted: false,
        created,
        last_updated: created,
        created_at_client: None,
        last_updated_at_client: None,
        created_by_user_info: None,
        last_updated_by_user_info: None,
        event_data_values: Vec::new(),
        notes: Vec::new(),
    }
}

fn template(trigger: NotificationTrigger, days: i64) -> NotificationTemplate {
    NotificationTemplate::new("PrgNotif001", trigger, ProgramNotificationRecipient::TrackedEntityInstance)
        .with_relative_scheduled_days(days)
}

#[parameterized(
    enrollment = { NotificationTrigger::Enrollment, true, true, false },
    completion = { NotificationTrigger::Completion, true, true, true },
    program_rule = { NotificationTrigger::ProgramRule, true, true, true },
    due_date = { NotificationTrigger::ScheduledDaysDueDate, false, false, true },
    incident_date = { NotificationTrigger::ScheduledDaysIncidentDate, false, true, false },
    enrollment_date = { NotificationTrigger::ScheduledDaysEnrollmentDate, false, true, false },
)]
fn trigger_classification(trigger: NotificationTrigger, immediate: bool, enrollment: bool, event: bool) {
    assert_eq!(trigger.is_immediate(), immediate);
    assert_eq!(trigger.is_scheduled(), !immediate);
    assert_eq!(trigger.is_applicable_to_enrollment(), enrollment);
    assert_eq!(trigger.is_applicable_to_event(), event);
}

#[test]
fn scheduled_sets_split_by_entity() {
    let enrollment: Vec<_> = NotificationTrigger::ALL
        .into_iter()
        .filter(NotificationTrigger::is_enrollment_scheduled)
        .collect();
    assert_eq!(
        enrollment,
        vec![
            NotificationTrigger::ScheduledDaysIncidentDate,
            NotificationTrigger::ScheduledDaysEnrollmentDate,
        ]
    );

    let event: Vec<_> = NotificationTrigger::ALL
        .into_iter()
        .filter(NotificationTrigger::is_event_scheduled)
        .collect();
    assert_eq!(event, vec![NotificationTrigger::ScheduledDaysDueDate]);

    assert_eq!(NotificationTrigger::immediate().count(), 3);
    assert_eq!(NotificationTrigger::scheduled().count(), 3);
    assert_eq!(NotificationTrigger::applicable_to_enrollment().count(), 5);
    assert_eq!(NotificationTrigger::applicable_to_event().count(), 3);
}

#[parameterized(
    upper = { "PROGRAM_RULE", NotificationTrigger::ProgramRule },
    lower = { "scheduled_days_due_date", NotificationTrigger::ScheduledDaysDueDate },
    kebab = { "scheduled-days-incident-date", NotificationTrigger::ScheduledDaysIncidentDate },
)]
fn trigger_from_str(input: &str, expected: NotificationTrigger) {
    assert_eq!(input.parse::<NotificationTrigger>().unwrap(), expected);
}

#[test]
fn unknown_trigger_is_rejected() {
    let err = "WEEKLY".parse::<NotificationTrigger>().unwrap_err();
    assert!(matches!(err, Error::InvalidNotificationTrigger(ref s) if s == "WEEKLY"));
}

#[parameterized(
    tracked_entity = { ProgramNotificationRecipient::TrackedEntityInstance, true },
    org_unit_contact = { ProgramNotificationRecipient::OrganisationUnitContact, true },
    users_at_org_unit = { ProgramNotificationRecipient::UsersAtOrganisationUnit, false },
    user_group = { ProgramNotificationRecipient::UserGroup, false },
    program_attribute = { ProgramNotificationRecipient::ProgramAttribute, true },
    data_element = { ProgramNotificationRecipient::DataElement, true },
    web_hook = { ProgramNotificationRecipient::WebHook, false },
)]
fn external_recipients(recipient: ProgramNotificationRecipient, external: bool) {
    assert_eq!(recipient.is_external_recipient(), external);
    assert_eq!(recipient.as_str().parse::<ProgramNotificationRecipient>().unwrap(), recipient);
}

#[test]
fn unknown_recipient_is_rejected() {
    let err = "PIGEON".parse::<ProgramNotificationRecipient>().unwrap_err();
    assert!(matches!(err, Error::InvalidNotificationRecipient(_)));
}

#[test]
fn scheduled_template_requires_days() {
    let template = NotificationTemplate::new(
        "PrgNotif001",
        NotificationTrigger::ScheduledDaysDueDate,
        ProgramNotificationRecipient::TrackedEntityInstance,
    );
    let err = template.validate().unwrap_err();
    assert!(err.to_string().contains("relativeScheduledDays"));

    assert!(template.with_relative_scheduled_days(0).validate().is_ok());
}

#[parameterized(
    user_group = { ProgramNotificationRecipient::UserGroup, "recipientUserGroup" },
    program_attribute = { ProgramNotificationRecipient::ProgramAttribute, "recipientProgramAttribute" },
    data_element = { ProgramNotificationRecipient::DataElement, "recipientDataElement" },
)]
fn recipient_requires_reference(recipient: ProgramNotificationRecipient, field: &str) {
    let mut template = NotificationTemplate::new("PrgNotif001", NotificationTrigger::Enrollment, recipient);
    let err = template.validate().unwrap_err();
    assert!(err.to_string().contains(field));

    template.recipient_user_group = Some("UsrGroup001".into());
    template.recipient_program_attribute = Some("AttrUid0001".into());
    template.recipient_data_element = Some("DataElm0001".into());
    assert!(template.validate().is_ok());
}

#[test]
fn immediate_template_needs_no_days() {
    let template = NotificationTemplate::new(
        "PrgNotif001",
        NotificationTrigger::Completion,
        ProgramNotificationRecipient::WebHook,
    );
    assert!(template.validate().is_ok());
}

#[parameterized(
    enrollment_date = { NotificationTrigger::ScheduledDaysEnrollmentDate, 7, at(2026, 3, 8) },
    incident_date = { NotificationTrigger::ScheduledDaysIncidentDate, 7, at(2026, 2, 27) },
    before_anchor = { NotificationTrigger::ScheduledDaysEnrollmentDate, -3, at(2026, 2, 26) },
)]
fn enrollment_schedule_is_offset_from_anchor(trigger: NotificationTrigger, days: i64, expected: DateTime<Utc>) {
    let enrollment = enrollment(EnrollmentStatus::Active);
    assert_eq!(template(trigger, days).scheduled_date_for_enrollment(&enrollment), Some(expected));
}

#[parameterized(
    completed = { EnrollmentStatus::Completed },
    cancelled = { EnrollmentStatus::Cancelled },
)]
fn inactive_enrollment_is_not_scheduled(status: EnrollmentStatus) {
    let template = template(NotificationTrigger::ScheduledDaysEnrollmentDate, 7);
    assert_eq!(template.scheduled_date_for_enrollment(&enrollment(status)), None);
}

#[test]
fn enrollment_without_anchor_is_not_scheduled() {
    let mut enrollment = enrollment(EnrollmentStatus::Active);
    enrollment.incident_date = None;
    let template = template(NotificationTrigger::ScheduledDaysIncidentDate, 1);
    assert_eq!(template.scheduled_date_for_enrollment(&enrollment), None);
}

#[test]
fn due_date_trigger_does_not_apply_to_enrollment() {
    let template = template(NotificationTrigger::ScheduledDaysDueDate, 1);
    assert_eq!(
        template.scheduled_date_for_enrollment(&enrollment(EnrollmentStatus::Active)),
        None
    );
}

#[test]
fn event_schedule_is_offset_from_due_date() {
    let template = template(NotificationTrigger::ScheduledDaysDueDate, -2);
    let event = event(EventStatus::Schedule);
    assert_eq!(template.scheduled_date_for_event(&event), Some(at(2026, 4, 8)));
    assert!(template.is_due_for_event(&event, at(2026, 4, 8).date_naive()));
    assert!(!template.is_due_for_event(&event, at(2026, 4, 10).date_naive()));
}

#[test]
fn skipped_event_is_not_scheduled() {
    let template = template(NotificationTrigger::ScheduledDaysDueDate, 0);
    assert_eq!(template.scheduled_date_for_event(&event(EventStatus::Skipped)), None);
}

#[test]
fn occurred_event_is_not_scheduled() {
    let template = template(NotificationTrigger::ScheduledDaysDueDate, 0);
    let mut event = event(EventStatus::Active);
    event.occurred_date = Some(at(2026, 4, 9));
    assert_eq!(template.scheduled_date_for_event(&event), None);
}

#[test]
fn deleted_entities_are_not_scheduled() {
    let mut enrollment = enrollment(EnrollmentStatus::Active);
    enrollment.deleted = true;
    let mut event = event(EventStatus::Schedule);
    event.deleted = true;

    assert_eq!(
        template(NotificationTrigger::ScheduledDaysEnrollmentDate, 0).scheduled_date_for_enrollment(&enrollment),
        None
    );
    assert_eq!(
        template(NotificationTrigger::ScheduledDaysDueDate, 0).scheduled_date_for_event(&event),
        None
    );
}

#[test]
fn enrollment_due_on_scheduled_day() {
    let template = template(NotificationTrigger::ScheduledDaysEnrollmentDate, 7);
    let enrollment = enrollment(EnrollmentStatus::Active);
    assert!(template.is_due_for_enrollment(&enrollment, at(2026, 3, 8).date_naive()));
    assert!(!template.is_due_for_enrollment(&enrollment, at(2026, 3, 7).date_naive()));
}

#[test]
fn template_json_is_camel_case() {
    let json = r#"{
        "uid": "PrgNotif001",
        "name": "Reminder",
        "notificationTrigger": "SCHEDULED_DAYS_DUE_DATE",
        "notificationRecipient": "DATA_ELEMENT",
        "relativeScheduledDays": 3,
        "recipientDataElement": "DataElm0001"
    }"#;
    let template: NotificationTemplate = serde_json::from_str(json).unwrap();
    assert_eq!(template.notification_trigger, NotificationTrigger::ScheduledDaysDueDate);
    assert_eq!(template.notification_recipient, ProgramNotificationRecipient::DataElement);
    assert_eq!(template.relative_scheduled_days, Some(3));
    assert!(template.validate().is_ok());

    let value = serde_json::to_value(&template).unwrap();
    assert!(value.get("recipientUserGroup").is_none());
}
