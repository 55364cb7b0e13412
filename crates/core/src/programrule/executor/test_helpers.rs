// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for executor tests.

use chrono::{TimeZone, Utc};

use crate::sharing::User;
use crate::tracker::domain::{Attribute, DataValue, Enrollment, Event, TrackedEntity, TrackerPayload};
use crate::tracker::metadata::{DataElement, ProgramStage, TrackedEntityAttribute, ValueType};
use crate::tracker::{model, EnrollmentStatus, EventStatus, TrackerBundle, TrackerImportStrategy, TrackerPreheat};

pub const RULE: &str = "RuleUid0001";
pub const STAGE: &str = "ProgStg0001";
pub const OTHER_STAGE: &str = "ProgStg0002";
pub const WEIGHT: &str = "DataElm0001";
pub const NOTE: &str = "DataElm0002";
pub const AGE: &str = "AttrUid0001";
pub const NICKNAME: &str = "AttrUid0002";
pub const TE: &str = "TrackEnt001";
pub const ENROLLMENT: &str = "Enrollmt001";
pub const EVENT: &str = "EventUid001";

/// Metadata shared by every executor test.
pub fn preheat() -> TrackerPreheat {
    let mut preheat = TrackerPreheat::default().with_user(User::new("UserUid0001", "clerk"));
    preheat.put_program_stage(ProgramStage {
        uid: STAGE.into(),
        program: "Program0001".into(),
        data_elements: vec![WEIGHT.into(), NOTE.into()],
        ..Default::default()
    });
    preheat.put_program_stage(ProgramStage {
        uid: OTHER_STAGE.into(),
        program: "Program0001".into(),
        ..Default::default()
    });
    preheat.put_data_element(DataElement {
        uid: WEIGHT.into(),
        code: Some("WEIGHT".into()),
        value_type: ValueType::Number,
        ..Default::default()
    });
    preheat.put_data_element(DataElement {
        uid: NOTE.into(),
        code: Some("NOTE".into()),
        value_type: ValueType::Text,
        ..Default::default()
    });
    preheat.put_tracked_entity_attribute(TrackedEntityAttribute {
        uid: AGE.into(),
        value_type: ValueType::Integer,
        ..Default::default()
    });
    preheat.put_tracked_entity_attribute(TrackedEntityAttribute {
        uid: NICKNAME.into(),
        value_type: ValueType::Text,
        ..Default::default()
    });
    preheat
}

/// Persists a tracked entity holding `values`.
pub fn stored_tracked_entity(preheat: &mut TrackerPreheat, values: &[(&str, &str)]) {
    preheat.put_tracked_entity(model::TrackedEntity {
        uid: TE.into(),
        attribute_values: values
            .iter()
            .map(|(attribute, value)| model::TrackedEntityAttributeValue {
                attribute: attribute.to_string(),
                value: value.to_string(),
                stored_by: None,
                created: None,
                last_updated: None,
            })
            .collect(),
        ..Default::default()
    });
}

/// Persists an event of `STAGE` holding `values`.
pub fn stored_event(preheat: &mut TrackerPreheat, values: &[(&str, &str)]) {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().unwrap_or_default();
    preheat.put_event(model::Event {
        uid: EVENT.into(),
        enrollment: None,
        program_stage: STAGE.into(),
        organisation_unit: "OrgUnit0001".into(),
        attribute_option_combo: None,
        status: EventStatus::Active,
        occurred_date: None,
        scheduled_date: None,
        completed_date: None,
        completed_by: None,
        stored_by: None,
        deleted: false,
        created: at,
        last_updated: at,
        created_at_client: None,
        last_updated_at_client: None,
        created_by_user_info: None,
        last_updated_by_user_info: None,
        event_data_values: values
            .iter()
            .map(|(data_element, value)| model::EventDataValue {
                data_element: data_element.to_string(),
                value: Some(value.to_string()),
                provided_elsewhere: false,
                stored_by: None,
                created: at,
                last_updated: at,
                created_by_user_info: None,
                last_updated_by_user_info: None,
            })
            .collect(),
        notes: Vec::new(),
    });
}

pub fn attributes(values: &[(&str, Option<&str>)]) -> Vec<Attribute> {
    values
        .iter()
        .map(|(attribute, value)| Attribute::new(*attribute, value.map(str::to_string)))
        .collect()
}

pub fn data_values(values: &[(&str, Option<&str>)]) -> Vec<DataValue> {
    values
        .iter()
        .map(|(data_element, value)| DataValue::new(*data_element, value.map(str::to_string)))
        .collect()
}

pub fn enrollment(status: EnrollmentStatus, attributes: Vec<Attribute>) -> Enrollment {
    Enrollment {
        enrollment: ENROLLMENT.into(),
        tracked_entity: Some(TE.into()),
        program: "Program0001".into(),
        org_unit: "OrgUnit0001".into(),
        status,
        attributes,
        ..Default::default()
    }
}

pub fn tracked_entity(attributes: Vec<Attribute>) -> TrackedEntity {
    TrackedEntity {
        tracked_entity: TE.into(),
        org_unit: "OrgUnit0001".into(),
        attributes,
        ..Default::default()
    }
}

pub fn event(stage: &str, status: EventStatus, data_values: Vec<DataValue>) -> Event {
    Event {
        event: EVENT.into(),
        program_stage: stage.into(),
        org_unit: "OrgUnit0001".into(),
        status,
        data_values,
        ..Default::default()
    }
}

pub fn bundle(preheat: TrackerPreheat, payload: TrackerPayload) -> TrackerBundle {
    TrackerBundle::new(preheat, payload, TrackerImportStrategy::CreateAndUpdate)
}
