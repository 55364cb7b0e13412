// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-level tracker payload types.
//!
//! Metadata references (`program`, `orgUnit`, `dataElement`, ...) are raw
//! strings interpreted under the configured id scheme. Entity references
//! (`trackedEntity`, `enrollment`, `event`) are always uids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracker::model::UserInfoSnapshot;
use crate::tracker::{EnrollmentStatus, EventStatus, TrackerType};

/// A tracked entity attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute uid.
    pub attribute: String,
    /// `None` deletes the value.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Attribute {
    pub fn new(attribute: impl Into<String>, value: Option<String>) -> Self {
        Attribute {
            attribute: attribute.into(),
            value,
            ..Default::default()
        }
    }
}

/// An event data value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValue {
    pub data_element: String,
    /// `None` deletes the value.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub provided_elsewhere: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DataValue {
    pub fn new(data_element: impl Into<String>, value: Option<String>) -> Self {
        DataValue {
            data_element: data_element.into(),
            value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note uid.
    pub note: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserInfoSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntity {
    pub tracked_entity: String,
    #[serde(default)]
    pub tracked_entity_type: String,
    #[serde(default)]
    pub org_unit: String,
    #[serde(default)]
    pub inactive: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TrackedEntity {
    pub fn attribute(&self, attribute_uid: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.attribute == attribute_uid)
    }

    pub fn attribute_mut(&mut self, attribute_uid: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.attribute == attribute_uid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub enrollment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_entity: Option<String>,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub org_unit: String,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default)]
    pub follow_up: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn attribute(&self, attribute_uid: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.attribute == attribute_uid)
    }

    pub fn attribute_mut(&mut self, attribute_uid: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.attribute == attribute_uid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub program_stage: String,
    #[serde(default)]
    pub org_unit: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_option_combo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub data_values: Vec<DataValue>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One end of a relationship. Exactly one field should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl RelationshipItem {
    pub fn of(tracker_type: TrackerType, uid: impl Into<String>) -> Self {
        let uid = Some(uid.into());
        match tracker_type {
            TrackerType::Enrollment => RelationshipItem {
                enrollment: uid,
                ..Default::default()
            },
            TrackerType::Event => RelationshipItem {
                event: uid,
                ..Default::default()
            },
            TrackerType::TrackedEntity | TrackerType::Relationship => RelationshipItem {
                tracked_entity: uid,
                ..Default::default()
            },
        }
    }

    /// The referenced entity, `None` unless exactly one field is set.
    pub fn resolve(&self) -> Option<(TrackerType, &str)> {
        let set: Vec<(TrackerType, &str)> = [
            (TrackerType::TrackedEntity, self.tracked_entity.as_deref()),
            (TrackerType::Enrollment, self.enrollment.as_deref()),
            (TrackerType::Event, self.event.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, uid)| uid.filter(|u| !u.is_empty()).map(|u| (kind, u)))
        .collect();

        match set.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub relationship: String,
    #[serde(default)]
    pub relationship_type: String,
    #[serde(default)]
    pub from: RelationshipItem,
    #[serde(default)]
    pub to: RelationshipItem,
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A full import payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerPayload {
    pub tracked_entities: Vec<TrackedEntity>,
    pub enrollments: Vec<Enrollment>,
    pub events: Vec<Event>,
    pub relationships: Vec<Relationship>,
}

impl TrackerPayload {
    pub fn is_empty(&self) -> bool {
        self.tracked_entities.is_empty()
            && self.enrollments.is_empty()
            && self.events.is_empty()
            && self.relationships.is_empty()
    }
}

#[cfg(test)]
#[path = "domain_tests.rs"]
mod tests;
