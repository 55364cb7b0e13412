// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted tracker entities. Metadata is always referenced by uid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sharing::User;
use crate::tracker::domain::RelationshipItem;
use crate::tracker::{EnrollmentStatus, EventStatus};

/// Who created or last touched an entity, frozen at that moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoSnapshot {
    pub uid: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

impl UserInfoSnapshot {
    pub fn from_user(user: &User) -> Self {
        UserInfoSnapshot {
            uid: user.uid.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            surname: user.surname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntityAttributeValue {
    /// Attribute uid.
    pub attribute: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntity {
    pub uid: String,
    #[serde(default)]
    pub tracked_entity_type: String,
    #[serde(default)]
    pub organisation_unit: String,
    #[serde(default)]
    pub inactive: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub attribute_values: Vec<TrackedEntityAttributeValue>,
}

impl TrackedEntity {
    /// Stored value of `attribute_uid`, if any.
    pub fn attribute_value(&self, attribute_uid: &str) -> Option<&str> {
        self.attribute_values
            .iter()
            .find(|v| v.attribute == attribute_uid)
            .map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub uid: String,
    pub note_text: String,
    /// Username of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<UserInfoSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_entity: Option<String>,
    pub program: String,
    pub organisation_unit: String,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<DateTime<Utc>>,
    /// When the enrolled condition started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default)]
    pub follow_up: bool,
    #[serde(default)]
    pub deleted: bool,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_client: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at_client: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDataValue {
    /// Data element uid.
    pub data_element: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub provided_elsewhere: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by_user_info: Option<UserInfoSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    pub program_stage: String,
    pub organisation_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_option_combo: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_by: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_client: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at_client: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default)]
    pub event_data_values: Vec<EventDataValue>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Event {
    pub fn data_value(&self, data_element_uid: &str) -> Option<&EventDataValue> {
        self.event_data_values
            .iter()
            .find(|v| v.data_element == data_element_uid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub uid: String,
    pub relationship_type: String,
    pub from: RelationshipItem,
    pub to: RelationshipItem,
    /// `{type}_{from}_{to}`, used to detect duplicates.
    pub key: String,
    /// `{type}_{to}_{from}`, matched against `key` for bidirectional types.
    pub inverted_key: String,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_client: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by_user_info: Option<UserInfoSnapshot>,
    #[serde(default)]
    pub deleted: bool,
}

/// Builds the duplicate detection key of a relationship.
pub fn relationship_key(relationship_type: &str, from_uid: &str, to_uid: &str) -> String {
    format!("{relationship_type}_{from_uid}_{to_uid}")
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
