// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::programrule::executor::test_helpers::*;
use crate::programrule::issue::IssueType;
use crate::tracker::domain::TrackerPayload;
use crate::tracker::{EnrollmentStatus, EventStatus, TrackerImportStrategy, TrackerPreheat};

fn mandatory_attribute() -> SetMandatoryFieldExecutor {
    SetMandatoryFieldExecutor::new(RULE, MandatoryField::Attribute(NICKNAME.into()))
}

fn mandatory_data_element() -> SetMandatoryFieldExecutor {
    SetMandatoryFieldExecutor::new(RULE, MandatoryField::DataElement(WEIGHT.into()))
}

fn enrollment_bundle(
    preheat: TrackerPreheat,
    strategy: TrackerImportStrategy,
    values: &[(&str, Option<&str>)],
) -> TrackerBundle {
    let payload = TrackerPayload {
        enrollments: vec![enrollment(EnrollmentStatus::Active, attributes(values))],
        ..Default::default()
    };
    TrackerBundle::new(preheat, payload, strategy)
}

fn run_enrollment(bundle: &mut TrackerBundle) -> Option<ProgramRuleIssue> {
    mandatory_attribute().execute_rule_action(bundle, RuleTarget::Enrollment(ENROLLMENT))
}

#[test]
fn provided_attribute_passes() {
    let mut bundle = enrollment_bundle(preheat(), TrackerImportStrategy::Create, &[(NICKNAME, Some("Bob"))]);
    assert!(run_enrollment(&mut bundle).is_none());
}

#[test]
fn missing_attribute_on_create_fails() {
    let mut bundle = enrollment_bundle(preheat(), TrackerImportStrategy::Create, &[]);

    let issue = run_enrollment(&mut bundle).unwrap();

    assert_eq!(issue.issue_type, IssueType::Error);
    assert_eq!(issue.validation_code, ValidationCode::E1306);
    assert_eq!(issue.args, vec![RULE.to_string(), NICKNAME.to_string()]);
}

#[test]
fn stored_attribute_satisfies_update() {
    let mut preheat = preheat();
    stored_tracked_entity(&mut preheat, &[(NICKNAME, "Bob")]);
    let mut bundle = enrollment_bundle(preheat, TrackerImportStrategy::Update, &[]);

    assert!(run_enrollment(&mut bundle).is_none());
}

#[test]
fn attribute_on_tracked_entity_payload_passes() {
    let payload = TrackerPayload {
        enrollments: vec![enrollment(EnrollmentStatus::Active, Vec::new())],
        tracked_entities: vec![tracked_entity(attributes(&[(NICKNAME, Some("Bob"))]))],
        ..Default::default()
    };
    let mut bundle = TrackerBundle::new(preheat(), payload, TrackerImportStrategy::Create);

    assert!(run_enrollment(&mut bundle).is_none());
}

#[test]
fn deleted_attribute_fails_even_when_stored() {
    for strategy in [TrackerImportStrategy::Create, TrackerImportStrategy::Update] {
        let mut preheat = preheat();
        stored_tracked_entity(&mut preheat, &[(NICKNAME, "Bob")]);
        let mut bundle = enrollment_bundle(preheat, strategy, &[(NICKNAME, None)]);

        let issue = run_enrollment(&mut bundle).unwrap();

        assert_eq!(issue.issue_type, IssueType::Error);
        assert_eq!(issue.validation_code, ValidationCode::E1317);
    }
}

#[test]
fn entity_being_deleted_is_not_checked() {
    let mut bundle = enrollment_bundle(preheat(), TrackerImportStrategy::Delete, &[]);
    assert!(run_enrollment(&mut bundle).is_none());

    let mut bundle = enrollment_bundle(preheat(), TrackerImportStrategy::Delete, &[(NICKNAME, None)]);
    assert!(run_enrollment(&mut bundle).is_none());
}

fn event_bundle(preheat: TrackerPreheat, values: &[(&str, Option<&str>)]) -> TrackerBundle {
    bundle(
        preheat,
        TrackerPayload {
            events: vec![event(STAGE, EventStatus::Active, data_values(values))],
            ..Default::default()
        },
    )
}

#[test]
fn missing_data_element_fails() {
    let mut bundle = event_bundle(preheat(), &[]);

    let issue = mandatory_data_element()
        .execute_rule_action(&mut bundle, RuleTarget::Event(EVENT))
        .unwrap();

    assert_eq!(issue.validation_code, ValidationCode::E1301);
}

#[test]
fn stored_data_element_passes() {
    let mut preheat = preheat();
    stored_event(&mut preheat, &[(WEIGHT, "3.1")]);
    let mut bundle = event_bundle(preheat, &[]);

    assert!(mandatory_data_element()
        .execute_rule_action(&mut bundle, RuleTarget::Event(EVENT))
        .is_none());
}

#[test]
fn deleted_data_element_fails() {
    let mut preheat = preheat();
    stored_event(&mut preheat, &[(WEIGHT, "3.1")]);
    let mut bundle = event_bundle(preheat, &[(WEIGHT, None)]);

    let issue = mandatory_data_element()
        .execute_rule_action(&mut bundle, RuleTarget::Event(EVENT))
        .unwrap();

    assert_eq!(issue.validation_code, ValidationCode::E1317);
}

#[test]
fn field_kind_must_match_target() {
    let mut bundle = event_bundle(preheat(), &[]);
    assert!(mandatory_attribute()
        .execute_rule_action(&mut bundle, RuleTarget::Event(EVENT))
        .is_none());
}
