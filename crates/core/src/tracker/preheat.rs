// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request-scoped cache of everything an import payload references.
//!
//! Metadata is indexed by the identifier of the configured scheme for its
//! kind, so a payload written with codes resolves against codes. Persisted
//! tracker entities are always indexed by uid. The preheat is filled once
//! before conversion and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::sharing::{CategoryOptionCombo, User};
use crate::tracker::id::{IdSchemeParam, MetadataIdentifier, TrackerIdSchemeParams};
use crate::tracker::metadata::{
    DataElement, IdentifiableObject, OrganisationUnit, Program, ProgramStage, RelationshipType,
    TrackedEntityAttribute, TrackedEntityType,
};
use crate::tracker::model::{self, UserInfoSnapshot};
use crate::tracker::TrackerType;

/// Serialized form of a preheat, as produced by an external preheat stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreheatSnapshot {
    pub user: Option<User>,
    pub programs: Vec<Program>,
    pub program_stages: Vec<ProgramStage>,
    pub org_units: Vec<OrganisationUnit>,
    pub data_elements: Vec<DataElement>,
    pub category_option_combos: Vec<CategoryOptionCombo>,
    pub tracked_entity_attributes: Vec<TrackedEntityAttribute>,
    pub tracked_entity_types: Vec<TrackedEntityType>,
    pub relationship_types: Vec<RelationshipType>,
    /// Uid of the system default category option combo.
    pub default_category_option_combo: Option<String>,
    pub tracked_entities: Vec<model::TrackedEntity>,
    pub enrollments: Vec<model::Enrollment>,
    pub events: Vec<model::Event>,
    pub relationships: Vec<model::Relationship>,
    /// Uids of notes that already exist.
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TrackerPreheat {
    id_schemes: TrackerIdSchemeParams,
    user: Option<User>,
    programs: HashMap<MetadataIdentifier, Program>,
    program_stages: HashMap<MetadataIdentifier, ProgramStage>,
    org_units: HashMap<MetadataIdentifier, OrganisationUnit>,
    data_elements: HashMap<MetadataIdentifier, DataElement>,
    category_option_combos: HashMap<MetadataIdentifier, CategoryOptionCombo>,
    tracked_entity_attributes: HashMap<String, TrackedEntityAttribute>,
    tracked_entity_types: HashMap<String, TrackedEntityType>,
    relationship_types: HashMap<MetadataIdentifier, RelationshipType>,
    default_category_option_combo: Option<String>,
    tracked_entities: HashMap<String, model::TrackedEntity>,
    enrollments: HashMap<String, model::Enrollment>,
    events: HashMap<String, model::Event>,
    relationships: HashMap<String, model::Relationship>,
    relationship_keys: HashSet<String>,
    notes: HashSet<String>,
}

impl TrackerPreheat {
    pub fn new(id_schemes: TrackerIdSchemeParams) -> Self {
        TrackerPreheat {
            id_schemes,
            ..Default::default()
        }
    }

    /// Indexes a snapshot under `id_schemes`.
    pub fn from_snapshot(snapshot: PreheatSnapshot, id_schemes: TrackerIdSchemeParams) -> Self {
        let mut preheat = TrackerPreheat::new(id_schemes);
        preheat.user = snapshot.user;
        preheat.default_category_option_combo = snapshot.default_category_option_combo;

        snapshot.programs.into_iter().for_each(|p| {
            preheat.put_program(p);
        });
        snapshot.program_stages.into_iter().for_each(|s| {
            preheat.put_program_stage(s);
        });
        snapshot.org_units.into_iter().for_each(|o| {
            preheat.put_org_unit(o);
        });
        snapshot.data_elements.into_iter().for_each(|d| {
            preheat.put_data_element(d);
        });
        snapshot.category_option_combos.into_iter().for_each(|c| {
            preheat.put_category_option_combo(c);
        });
        snapshot
            .tracked_entity_attributes
            .into_iter()
            .for_each(|a| preheat.put_tracked_entity_attribute(a));
        snapshot
            .tracked_entity_types
            .into_iter()
            .for_each(|t| preheat.put_tracked_entity_type(t));
        snapshot.relationship_types.into_iter().for_each(|t| {
            preheat.put_relationship_type(t);
        });
        snapshot
            .tracked_entities
            .into_iter()
            .for_each(|te| preheat.put_tracked_entity(te));
        snapshot
            .enrollments
            .into_iter()
            .for_each(|e| preheat.put_enrollment(e));
        snapshot.events.into_iter().for_each(|e| preheat.put_event(e));
        snapshot
            .relationships
            .into_iter()
            .for_each(|r| preheat.put_relationship(r));
        snapshot.notes.into_iter().for_each(|n| preheat.put_note(n));
        preheat
    }

    pub fn id_schemes(&self) -> &TrackerIdSchemeParams {
        &self.id_schemes
    }

    // ─────────────────────────────────────────────────────────────────────
    // Current user
    // ─────────────────────────────────────────────────────────────────────

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn user_info(&self) -> Option<UserInfoSnapshot> {
        self.user.as_ref().map(UserInfoSnapshot::from_user)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Metadata keyed by the configured scheme
    // ─────────────────────────────────────────────────────────────────────

    /// Returns false when the program has no identifier under the scheme.
    pub fn put_program(&mut self, program: Program) -> bool {
        index(&mut self.programs, self.id_schemes.program(), "program", program)
    }

    pub fn program(&self, identifier: &MetadataIdentifier) -> Option<&Program> {
        self.programs.get(identifier)
    }

    /// Resolves a payload reference under the program scheme.
    pub fn resolve_program(&self, raw: &str) -> Option<&Program> {
        self.program(&self.id_schemes.program().to_metadata_identifier(raw))
    }

    pub fn program_by_uid(&self, uid: &str) -> Option<&Program> {
        find_by_uid(&self.programs, uid)
    }

    pub fn put_program_stage(&mut self, program_stage: ProgramStage) -> bool {
        index(
            &mut self.program_stages,
            self.id_schemes.program_stage(),
            "programStage",
            program_stage,
        )
    }

    pub fn program_stage(&self, identifier: &MetadataIdentifier) -> Option<&ProgramStage> {
        self.program_stages.get(identifier)
    }

    pub fn resolve_program_stage(&self, raw: &str) -> Option<&ProgramStage> {
        self.program_stage(&self.id_schemes.program_stage().to_metadata_identifier(raw))
    }

    pub fn program_stage_by_uid(&self, uid: &str) -> Option<&ProgramStage> {
        find_by_uid(&self.program_stages, uid)
    }

    pub fn put_org_unit(&mut self, org_unit: OrganisationUnit) -> bool {
        index(&mut self.org_units, self.id_schemes.org_unit(), "orgUnit", org_unit)
    }

    pub fn org_unit(&self, identifier: &MetadataIdentifier) -> Option<&OrganisationUnit> {
        self.org_units.get(identifier)
    }

    pub fn resolve_org_unit(&self, raw: &str) -> Option<&OrganisationUnit> {
        self.org_unit(&self.id_schemes.org_unit().to_metadata_identifier(raw))
    }

    pub fn org_unit_by_uid(&self, uid: &str) -> Option<&OrganisationUnit> {
        find_by_uid(&self.org_units, uid)
    }

    pub fn put_data_element(&mut self, data_element: DataElement) -> bool {
        index(
            &mut self.data_elements,
            self.id_schemes.data_element(),
            "dataElement",
            data_element,
        )
    }

    pub fn data_element(&self, identifier: &MetadataIdentifier) -> Option<&DataElement> {
        self.data_elements.get(identifier)
    }

    pub fn resolve_data_element(&self, raw: &str) -> Option<&DataElement> {
        self.data_element(&self.id_schemes.data_element().to_metadata_identifier(raw))
    }

    pub fn data_element_by_uid(&self, uid: &str) -> Option<&DataElement> {
        find_by_uid(&self.data_elements, uid)
    }

    pub fn put_category_option_combo(&mut self, combo: CategoryOptionCombo) -> bool {
        index(
            &mut self.category_option_combos,
            self.id_schemes.category_option_combo(),
            "categoryOptionCombo",
            combo,
        )
    }

    pub fn category_option_combo(&self, identifier: &MetadataIdentifier) -> Option<&CategoryOptionCombo> {
        self.category_option_combos.get(identifier)
    }

    pub fn resolve_category_option_combo(&self, raw: &str) -> Option<&CategoryOptionCombo> {
        self.category_option_combo(
            &self
                .id_schemes
                .category_option_combo()
                .to_metadata_identifier(raw),
        )
    }

    pub fn category_option_combo_by_uid(&self, uid: &str) -> Option<&CategoryOptionCombo> {
        find_by_uid(&self.category_option_combos, uid)
    }

    pub fn put_relationship_type(&mut self, relationship_type: RelationshipType) -> bool {
        index(
            &mut self.relationship_types,
            self.id_schemes.relationship_type(),
            "relationshipType",
            relationship_type,
        )
    }

    pub fn relationship_type(&self, identifier: &MetadataIdentifier) -> Option<&RelationshipType> {
        self.relationship_types.get(identifier)
    }

    pub fn resolve_relationship_type(&self, raw: &str) -> Option<&RelationshipType> {
        self.relationship_type(&self.id_schemes.relationship_type().to_metadata_identifier(raw))
    }

    pub fn relationship_type_by_uid(&self, uid: &str) -> Option<&RelationshipType> {
        find_by_uid(&self.relationship_types, uid)
    }

    pub fn set_default_category_option_combo(&mut self, uid: impl Into<String>) {
        self.default_category_option_combo = Some(uid.into());
    }

    pub fn default_category_option_combo(&self) -> Option<&str> {
        self.default_category_option_combo.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Metadata keyed by uid
    // ─────────────────────────────────────────────────────────────────────

    pub fn put_tracked_entity_attribute(&mut self, attribute: TrackedEntityAttribute) {
        self.tracked_entity_attributes
            .insert(attribute.uid.clone(), attribute);
    }

    pub fn tracked_entity_attribute(&self, uid: &str) -> Option<&TrackedEntityAttribute> {
        self.tracked_entity_attributes.get(uid)
    }

    pub fn put_tracked_entity_type(&mut self, tracked_entity_type: TrackedEntityType) {
        self.tracked_entity_types
            .insert(tracked_entity_type.uid.clone(), tracked_entity_type);
    }

    pub fn tracked_entity_type(&self, uid: &str) -> Option<&TrackedEntityType> {
        self.tracked_entity_types.get(uid)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Persisted tracker entities
    // ─────────────────────────────────────────────────────────────────────

    pub fn put_tracked_entity(&mut self, tracked_entity: model::TrackedEntity) {
        self.tracked_entities
            .insert(tracked_entity.uid.clone(), tracked_entity);
    }

    pub fn tracked_entity(&self, uid: &str) -> Option<&model::TrackedEntity> {
        self.tracked_entities.get(uid)
    }

    pub fn put_enrollment(&mut self, enrollment: model::Enrollment) {
        self.enrollments.insert(enrollment.uid.clone(), enrollment);
    }

    pub fn enrollment(&self, uid: &str) -> Option<&model::Enrollment> {
        self.enrollments.get(uid)
    }

    pub fn put_event(&mut self, event: model::Event) {
        self.events.insert(event.uid.clone(), event);
    }

    pub fn event(&self, uid: &str) -> Option<&model::Event> {
        self.events.get(uid)
    }

    /// Stores a relationship and remembers its key for duplicate detection.
    pub fn put_relationship(&mut self, relationship: model::Relationship) {
        self.relationship_keys.insert(relationship.key.clone());
        self.relationships
            .insert(relationship.uid.clone(), relationship);
    }

    pub fn relationship(&self, uid: &str) -> Option<&model::Relationship> {
        self.relationships.get(uid)
    }

    /// An equivalent relationship already exists. For bidirectional types
    /// the same pair in the opposite direction also counts.
    pub fn is_duplicate(&self, relationship: &model::Relationship, bidirectional: bool) -> bool {
        let existing = self
            .relationships
            .get(&relationship.uid)
            .map(|r| r.key.as_str());
        let matches = |key: &str| self.relationship_keys.contains(key) && existing != Some(key);

        matches(&relationship.key) || (bidirectional && matches(&relationship.inverted_key))
    }

    pub fn put_note(&mut self, uid: impl Into<String>) {
        self.notes.insert(uid.into());
    }

    pub fn has_note(&self, uid: &str) -> bool {
        self.notes.contains(uid)
    }

    /// The entity is already persisted.
    pub fn exists(&self, tracker_type: TrackerType, uid: &str) -> bool {
        match tracker_type {
            TrackerType::TrackedEntity => self.tracked_entities.contains_key(uid),
            TrackerType::Enrollment => self.enrollments.contains_key(uid),
            TrackerType::Event => self.events.contains_key(uid),
            TrackerType::Relationship => self.relationships.contains_key(uid),
        }
    }
}

fn index<T: IdentifiableObject>(
    map: &mut HashMap<MetadataIdentifier, T>,
    param: &IdSchemeParam,
    kind: &'static str,
    object: T,
) -> bool {
    match param.identify(&object) {
        Some(key) => {
            map.insert(key, object);
            true
        }
        None => {
            warn!(kind, uid = object.uid(), scheme = %param, "no identifier under configured scheme, skipping");
            false
        }
    }
}

fn find_by_uid<'a, T: IdentifiableObject>(map: &'a HashMap<MetadataIdentifier, T>, uid: &str) -> Option<&'a T> {
    map.values().find(|object| object.uid() == uid)
}

#[cfg(test)]
#[path = "preheat_tests.rs"]
mod tests;
