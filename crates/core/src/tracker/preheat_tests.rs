// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::tracker::domain::RelationshipItem;
use crate::tracker::model::relationship_key;
use chrono::{TimeZone, Utc};

fn program(uid: &str, code: Option<&str>) -> Program {
    Program {
        uid: uid.into(),
        code: code.map(Into::into),
        name: format!("Program {uid}"),
        ..Default::default()
    }
}

fn relationship(uid: &str, from: &str, to: &str) -> model::Relationship {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    model::Relationship {
        uid: uid.into(),
        relationship_type: "RelType0001".into(),
        from: RelationshipItem::of(TrackerType::TrackedEntity, from),
        to: RelationshipItem::of(TrackerType::TrackedEntity, to),
        key: relationship_key("RelType0001", from, to),
        inverted_key: relationship_key("RelType0001", to, from),
        created: now,
        last_updated: now,
        created_at_client: None,
        last_updated_by_user_info: None,
        deleted: false,
    }
}

#[test]
fn resolves_metadata_under_uid_scheme() {
    let mut preheat = TrackerPreheat::default();
    assert!(preheat.put_program(program("Program0001", Some("MNCH"))));

    assert!(preheat.resolve_program("Program0001").is_some());
    assert!(preheat.resolve_program("MNCH").is_none());
    assert!(preheat.program(&MetadataIdentifier::of_uid("Program0001")).is_some());
}

#[test]
fn resolves_metadata_under_code_scheme() {
    let mut preheat = TrackerPreheat::new(TrackerIdSchemeParams {
        program_id_scheme: Some(IdSchemeParam::CODE),
        ..Default::default()
    });
    preheat.put_program(program("Program0001", Some("MNCH")));

    let found = preheat.resolve_program("MNCH").unwrap();
    assert_eq!(found.uid, "Program0001");
    assert!(preheat.resolve_program("Program0001").is_none());
    assert_eq!(preheat.program_by_uid("Program0001").unwrap().code.as_deref(), Some("MNCH"));
}

#[test]
fn metadata_without_scheme_identifier_is_skipped() {
    let mut preheat = TrackerPreheat::new(TrackerIdSchemeParams::uniform(IdSchemeParam::CODE));
    assert!(!preheat.put_program(program("Program0001", None)));
    assert!(preheat.program_by_uid("Program0001").is_none());
}

#[test]
fn resolves_org_unit_by_attribute_value() {
    let mut preheat = TrackerPreheat::new(TrackerIdSchemeParams {
        org_unit_id_scheme: Some(IdSchemeParam::of_attribute("LegacyId001")),
        ..Default::default()
    });
    let mut unit = OrganisationUnit {
        uid: "OrgUnit0001".into(),
        name: "Ngelehun CHC".into(),
        ..Default::default()
    };
    unit.attribute_values
        .insert("LegacyId001".into(), "ngelehun".into());
    preheat.put_org_unit(unit);

    assert_eq!(preheat.resolve_org_unit("ngelehun").unwrap().uid, "OrgUnit0001");
}

#[test]
fn user_info_comes_from_current_user() {
    let preheat = TrackerPreheat::default().with_user(User::new("Clerk000001", "clerk"));

    assert_eq!(preheat.username(), Some("clerk"));
    assert_eq!(preheat.user_info().unwrap().uid, "Clerk000001");
    assert!(TrackerPreheat::default().user_info().is_none());
}

#[test]
fn exists_checks_persisted_entities_by_kind() {
    let mut preheat = TrackerPreheat::default();
    preheat.put_tracked_entity(model::TrackedEntity {
        uid: "TrackEnt001".into(),
        ..Default::default()
    });
    preheat.put_relationship(relationship("Relation001", "TrackEnt001", "TrackEnt002"));

    assert!(preheat.exists(TrackerType::TrackedEntity, "TrackEnt001"));
    assert!(!preheat.exists(TrackerType::Enrollment, "TrackEnt001"));
    assert!(preheat.exists(TrackerType::Relationship, "Relation001"));
    assert!(!preheat.exists(TrackerType::Event, "Event000001"));
}

#[test]
fn duplicate_relationship_detection() {
    let mut preheat = TrackerPreheat::default();
    preheat.put_relationship(relationship("Relation001", "TrackEnt001", "TrackEnt002"));

    let same = relationship("Relation002", "TrackEnt001", "TrackEnt002");
    let reversed = relationship("Relation003", "TrackEnt002", "TrackEnt001");
    let itself = relationship("Relation001", "TrackEnt001", "TrackEnt002");

    assert!(preheat.is_duplicate(&same, false));
    assert!(!preheat.is_duplicate(&reversed, false));
    assert!(preheat.is_duplicate(&reversed, true));
    assert!(!preheat.is_duplicate(&itself, true));
}

#[test]
fn notes_are_tracked_by_uid() {
    let mut preheat = TrackerPreheat::default();
    preheat.put_note("Note0000001");
    assert!(preheat.has_note("Note0000001"));
    assert!(!preheat.has_note("Note0000002"));
}

#[test]
fn snapshot_is_indexed_under_given_schemes() {
    let json = r#"{
        "user": { "uid": "Clerk000001", "username": "clerk" },
        "programs": [{ "uid": "Program0001", "code": "MNCH", "name": "Child Programme" }],
        "orgUnits": [{ "uid": "OrgUnit0001", "code": "OU_1", "name": "Ngelehun" }],
        "categoryOptionCombos": [{ "uid": "Combo000001", "code": "default", "name": "default", "isDefault": true }],
        "defaultCategoryOptionCombo": "Combo000001",
        "notes": ["Note0000001"]
    }"#;
    let snapshot: PreheatSnapshot = serde_json::from_str(json).unwrap();
    let preheat = TrackerPreheat::from_snapshot(snapshot, TrackerIdSchemeParams::uniform(IdSchemeParam::CODE));

    assert_eq!(preheat.resolve_program("MNCH").unwrap().uid, "Program0001");
    assert_eq!(preheat.resolve_org_unit("OU_1").unwrap().uid, "OrgUnit0001");
    assert_eq!(preheat.default_category_option_combo(), Some("Combo000001"));
    assert!(preheat.category_option_combo_by_uid("Combo000001").unwrap().is_default);
    assert_eq!(preheat.username(), Some("clerk"));
    assert!(preheat.has_note("Note0000001"));
}
