// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use crate::sharing::{CategoryOptionCombo, User};
use crate::tracker::clock::FixedClock;
use crate::tracker::id::{IdSchemeParam, TrackerIdSchemeParams};
use crate::tracker::metadata::{DataElement, OrganisationUnit, Program, ProgramStage};
use chrono::TimeZone;
use yare::parameterized;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
}

fn earlier() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
}

fn converter() -> EventConverter<FixedClock> {
    EventConverter::with_clock(FixedClock(now()))
}

fn preheat_with(id_schemes: TrackerIdSchemeParams) -> TrackerPreheat {
    let mut preheat = TrackerPreheat::new(id_schemes).with_user(User::new("UserUid0001", "clerk"));
    preheat.put_program(Program {
        uid: "Program0001".into(),
        code: Some("MNCH".into()),
        ..Default::default()
    });
    preheat.put_program_stage(ProgramStage {
        uid: "ProgStg0001".into(),
        code: Some("BIRTH".into()),
        program: "Program0001".into(),
        data_elements: vec!["DataElm0001".into(), "DataElm0002".into()],
        ..Default::default()
    });
    preheat.put_org_unit(OrganisationUnit {
        uid: "OrgUnit0001".into(),
        code: Some("OU_NGELEHUN".into()),
        ..Default::default()
    });
    for (uid, code) in [("DataElm0001", "WEIGHT"), ("DataElm0002", "HEIGHT")] {
        preheat.put_data_element(DataElement {
            uid: uid.into(),
            code: Some(code.into()),
            ..Default::default()
        });
    }
    preheat.put_category_option_combo(CategoryOptionCombo {
        uid: "CatOptC0001".into(),
        code: Some("MALE".into()),
        ..Default::default()
    });
    preheat.put_category_option_combo(CategoryOptionCombo {
        uid: "CatOptCDflt".into(),
        code: Some("default".into()),
        is_default: true,
        ..Default::default()
    });
    preheat.set_default_category_option_combo("CatOptCDflt");
    preheat
}

fn preheat() -> TrackerPreheat {
    preheat_with(TrackerIdSchemeParams::default())
}

fn wire() -> domain::Event {
    domain::Event {
        event: "EventUid001".into(),
        enrollment: Some("Enrollmt001".into()),
        program_stage: "ProgStg0001".into(),
        org_unit: "OrgUnit0001".into(),
        occurred_at: Some(earlier()),
        data_values: vec![domain::DataValue::new("DataElm0001", Some("3.2".into()))],
        ..Default::default()
    }
}

fn stored() -> model::Event {
    converter().from_wire(&preheat(), &wire()).unwrap()
}

#[test]
fn new_event_gets_audit_fields() {
    let converted = stored();

    assert_eq!(converted.uid, "EventUid001");
    assert_eq!(converted.program_stage, "ProgStg0001");
    assert_eq!(converted.organisation_unit, "OrgUnit0001");
    assert_eq!(converted.enrollment.as_deref(), Some("Enrollmt001"));
    assert_eq!(converted.created, now());
    assert_eq!(converted.stored_by.as_deref(), Some("clerk"));
    assert_eq!(converted.created_by_user_info.unwrap().username, "clerk");
}

#[test]
fn absent_combo_falls_back_to_default() {
    assert_eq!(stored().attribute_option_combo.as_deref(), Some("CatOptCDflt"));
}

#[test]
fn explicit_combo_is_resolved() {
    let wire = domain::Event {
        attribute_option_combo: Some("CatOptC0001".into()),
        ..wire()
    };
    let converted = converter().from_wire(&preheat(), &wire).unwrap();
    assert_eq!(converted.attribute_option_combo.as_deref(), Some("CatOptC0001"));
}

#[parameterized(
    program_stage = { "Missing0001", "OrgUnit0001", None, "programStage" },
    org_unit = { "ProgStg0001", "Missing0001", None, "orgUnit" },
    combo = { "ProgStg0001", "OrgUnit0001", Some("Missing0001"), "attributeOptionCombo" },
)]
fn unresolved_reference_fails(program_stage: &str, org_unit: &str, combo: Option<&str>, expected_kind: &str) {
    let wire = domain::Event {
        program_stage: program_stage.into(),
        org_unit: org_unit.into(),
        attribute_option_combo: combo.map(Into::into),
        ..wire()
    };

    let err = converter().from_wire(&preheat(), &wire).unwrap_err();
    assert!(matches!(err, Error::UnresolvedReference { kind, .. } if kind == expected_kind));
}

#[test]
fn unresolved_data_element_is_dropped() {
    let wire = domain::Event {
        data_values: vec![
            domain::DataValue::new("DataElm0001", Some("3.2".into())),
            domain::DataValue::new("Missing0001", Some("x".into())),
        ],
        ..wire()
    };

    let converted = converter().from_wire(&preheat(), &wire).unwrap();

    assert_eq!(converted.event_data_values.len(), 1);
    assert_eq!(converted.event_data_values[0].data_element, "DataElm0001");
}

#[test]
fn merges_data_values_into_existing_event() {
    let mut preheat = preheat();
    preheat.put_event(stored());
    let wire = domain::Event {
        data_values: vec![
            domain::DataValue::new("DataElm0001", Some("3.5".into())),
            domain::DataValue::new("DataElm0002", Some("51".into())),
        ],
        ..wire()
    };

    let converted = converter().from_wire(&preheat, &wire).unwrap();

    assert_eq!(converted.event_data_values.len(), 2);
    let weight = converted.data_value("DataElm0001").unwrap();
    assert_eq!(weight.value.as_deref(), Some("3.5"));
    assert_eq!(weight.created, now());
    assert_eq!(converted.data_value("DataElm0002").unwrap().value.as_deref(), Some("51"));
}

#[test]
fn resolves_data_elements_under_code_scheme() {
    let preheat = preheat_with(TrackerIdSchemeParams {
        data_element_id_scheme: Some(IdSchemeParam::CODE),
        ..Default::default()
    });
    let wire = domain::Event {
        data_values: vec![domain::DataValue::new("HEIGHT", Some("51".into()))],
        ..wire()
    };

    let converted = converter().from_wire(&preheat, &wire).unwrap();
    assert_eq!(converted.event_data_values[0].data_element, "DataElm0002");

    let back = converter().to_wire(&preheat, &converted);
    assert_eq!(back.data_values[0].data_element, "HEIGHT");
}

#[test]
fn completing_stamps_completer() {
    let wire = domain::Event {
        status: EventStatus::Completed,
        ..wire()
    };

    let converted = converter().from_wire(&preheat(), &wire).unwrap();

    assert_eq!(converted.completed_by.as_deref(), Some("clerk"));
    assert_eq!(converted.completed_date, Some(now()));
}

#[test]
fn recompleting_keeps_first_completion() {
    let mut completed = stored();
    completed.status = EventStatus::Completed;
    completed.completed_by = Some("admin".into());
    completed.completed_date = Some(earlier());
    let mut preheat = preheat();
    preheat.put_event(completed);
    let wire = domain::Event {
        status: EventStatus::Completed,
        ..wire()
    };

    let converted = converter().from_wire(&preheat, &wire).unwrap();

    assert_eq!(converted.completed_by.as_deref(), Some("admin"));
    assert_eq!(converted.completed_date, Some(earlier()));
}

#[parameterized(
    active = { EventStatus::Active },
    schedule = { EventStatus::Schedule },
    skipped = { EventStatus::Skipped },
)]
fn non_completed_status_clears_completion(status: EventStatus) {
    let mut completed = stored();
    completed.status = EventStatus::Completed;
    completed.completed_by = Some("admin".into());
    completed.completed_date = Some(earlier());
    let mut preheat = preheat();
    preheat.put_event(completed);
    let wire = domain::Event { status, ..wire() };

    let converted = converter().from_wire(&preheat, &wire).unwrap();

    assert_eq!(converted.status, status);
    assert!(converted.completed_by.is_none());
    assert!(converted.completed_date.is_none());
}

#[test]
fn to_wire_renders_program_of_stage() {
    let preheat = preheat_with(TrackerIdSchemeParams::uniform(IdSchemeParam::CODE));
    let event = stored();

    let back = converter().to_wire(&preheat, &event);

    assert_eq!(back.program, "MNCH");
    assert_eq!(back.program_stage, "BIRTH");
    assert_eq!(back.org_unit, "OU_NGELEHUN");
    assert_eq!(back.attribute_option_combo.as_deref(), Some("default"));
    assert_eq!(back.data_values[0].data_element, "WEIGHT");
}
