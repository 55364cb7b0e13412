// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Metadata referenced by tracker payloads.
//!
//! Each type can be identified by uid, code, name or the value of an
//! attribute, depending on the id scheme the caller configured. Types that
//! carry sharing also implement [`Shareable`] so the same objects can be
//! handed to the sharing engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sharing::{object_type, AccessSource, CategoryOptionCombo, Shareable, Sharing};
use crate::tracker::TrackerType;

/// An object that can be referenced under any id scheme.
pub trait IdentifiableObject {
    fn uid(&self) -> &str;

    fn code(&self) -> Option<&str>;

    fn name(&self) -> &str;

    /// Value of the metadata attribute `attribute_uid` on this object.
    fn attribute_value(&self, attribute_uid: &str) -> Option<&str>;
}

macro_rules! identifiable {
    ($($ty:ty),+ $(,)?) => {$(
        impl IdentifiableObject for $ty {
            fn uid(&self) -> &str {
                &self.uid
            }

            fn code(&self) -> Option<&str> {
                self.code.as_deref()
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn attribute_value(&self, attribute_uid: &str) -> Option<&str> {
                self.attribute_values.get(attribute_uid).map(String::as_str)
            }
        }
    )+};
}

macro_rules! shareable {
    ($($ty:ty => $object_type:expr),+ $(,)?) => {$(
        impl Shareable for $ty {
            fn object_type(&self) -> &str {
                $object_type
            }

            fn uid(&self) -> &str {
                &self.uid
            }

            fn access_source(&self) -> AccessSource<'_> {
                AccessSource::Sharing(&self.sharing)
            }

            fn sharing_mut(&mut self) -> Option<&mut Sharing> {
                Some(&mut self.sharing)
            }
        }
    )+};
}

/// Type of value a data element or attribute holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    #[default]
    Text,
    LongText,
    Letter,
    PhoneNumber,
    Email,
    Boolean,
    TrueOnly,
    Date,
    DateTime,
    Time,
    Number,
    UnitInterval,
    Percentage,
    Integer,
    IntegerPositive,
    IntegerNegative,
    IntegerZeroOrPositive,
    OrganisationUnit,
    Age,
}

impl ValueType {
    /// Values compare as numbers, so `23` equals `23.0`.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Number
                | ValueType::UnitInterval
                | ValueType::Percentage
                | ValueType::Integer
                | ValueType::IntegerPositive
                | ValueType::IntegerNegative
                | ValueType::IntegerZeroOrPositive
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUnit {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    /// Slash-separated uids from the root down to this unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Whether a program tracks registered entities or standalone events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    #[default]
    WithRegistration,
    WithoutRegistration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
    #[serde(default)]
    pub program_type: ProgramType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_entity_type: Option<String>,
    /// Uids of the tracked entity attributes enrolled entities carry.
    #[serde(default)]
    pub program_attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStage {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
    /// Uid of the owning program.
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub repeatable: bool,
    /// Uids of the data elements collected in this stage.
    #[serde(default)]
    pub data_elements: Vec<String>,
}

impl ProgramStage {
    pub fn contains_data_element(&self, data_element_uid: &str) -> bool {
        self.data_elements.iter().any(|de| de == data_element_uid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElement {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
    #[serde(default)]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntityAttribute {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntityType {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
}

/// Entity kind allowed at one end of a relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipEntity {
    #[default]
    TrackedEntityInstance,
    ProgramInstance,
    ProgramStageInstance,
}

impl RelationshipEntity {
    /// The tracker entity kind this constraint admits.
    pub fn tracker_type(&self) -> TrackerType {
        match self {
            RelationshipEntity::TrackedEntityInstance => TrackerType::TrackedEntity,
            RelationshipEntity::ProgramInstance => TrackerType::Enrollment,
            RelationshipEntity::ProgramStageInstance => TrackerType::Event,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipType {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attribute_values: BTreeMap<String, String>,
    #[serde(default)]
    pub sharing: Sharing,
    /// Relationships of this type are the same seen from either end.
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default)]
    pub from_constraint: RelationshipEntity,
    #[serde(default)]
    pub to_constraint: RelationshipEntity,
}

identifiable!(
    OrganisationUnit,
    Program,
    ProgramStage,
    DataElement,
    TrackedEntityAttribute,
    TrackedEntityType,
    RelationshipType,
);

shareable!(
    Program => object_type::PROGRAM,
    ProgramStage => object_type::PROGRAM_STAGE,
    DataElement => object_type::DATA_ELEMENT,
    TrackedEntityAttribute => object_type::TRACKED_ENTITY_ATTRIBUTE,
    TrackedEntityType => object_type::TRACKED_ENTITY_TYPE,
    RelationshipType => object_type::RELATIONSHIP_TYPE,
);

impl IdentifiableObject for CategoryOptionCombo {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attribute_value(&self, _attribute_uid: &str) -> Option<&str> {
        None
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
