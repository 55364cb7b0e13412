// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The in-flight set of entities of one import request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tracker::domain::{Enrollment, Event, Relationship, TrackedEntity, TrackerPayload};
use crate::tracker::preheat::TrackerPreheat;
use crate::tracker::TrackerType;

/// What the caller wants done with the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerImportStrategy {
    Create,
    Update,
    #[default]
    CreateAndUpdate,
    Delete,
}

impl TrackerImportStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerImportStrategy::Create => "CREATE",
            TrackerImportStrategy::Update => "UPDATE",
            TrackerImportStrategy::CreateAndUpdate => "CREATE_AND_UPDATE",
            TrackerImportStrategy::Delete => "DELETE",
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, TrackerImportStrategy::Create)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, TrackerImportStrategy::Update)
    }

    pub fn is_create_and_update(&self) -> bool {
        matches!(self, TrackerImportStrategy::CreateAndUpdate)
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, TrackerImportStrategy::Delete)
    }
}

impl fmt::Display for TrackerImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrackerImportStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "CREATE" => Ok(TrackerImportStrategy::Create),
            "UPDATE" => Ok(TrackerImportStrategy::Update),
            "CREATE_AND_UPDATE" => Ok(TrackerImportStrategy::CreateAndUpdate),
            "DELETE" => Ok(TrackerImportStrategy::Delete),
            _ => Err(Error::InvalidImportStrategy(s.to_string())),
        }
    }
}

/// Payload entities plus the preheat they resolve against.
///
/// Program rule executors mutate the payload entities in place, so every
/// lookup goes through the bundle rather than a copy.
#[derive(Debug, Clone, Default)]
pub struct TrackerBundle {
    pub import_strategy: TrackerImportStrategy,
    pub preheat: TrackerPreheat,
    pub tracked_entities: Vec<TrackedEntity>,
    pub enrollments: Vec<Enrollment>,
    pub events: Vec<Event>,
    pub relationships: Vec<Relationship>,
}

impl TrackerBundle {
    pub fn new(preheat: TrackerPreheat, payload: TrackerPayload, import_strategy: TrackerImportStrategy) -> Self {
        TrackerBundle {
            import_strategy,
            preheat,
            tracked_entities: payload.tracked_entities,
            enrollments: payload.enrollments,
            events: payload.events,
            relationships: payload.relationships,
        }
    }

    /// The effective strategy for one entity. `CREATE_AND_UPDATE` becomes
    /// `UPDATE` for entities that already exist and `CREATE` otherwise.
    pub fn strategy(&self, tracker_type: TrackerType, uid: &str) -> TrackerImportStrategy {
        match self.import_strategy {
            TrackerImportStrategy::CreateAndUpdate if self.preheat.exists(tracker_type, uid) => {
                TrackerImportStrategy::Update
            }
            TrackerImportStrategy::CreateAndUpdate => TrackerImportStrategy::Create,
            strategy => strategy,
        }
    }

    pub fn tracked_entity(&self, uid: &str) -> Option<&TrackedEntity> {
        self.tracked_entities
            .iter()
            .find(|te| te.tracked_entity == uid)
    }

    pub fn tracked_entity_mut(&mut self, uid: &str) -> Option<&mut TrackedEntity> {
        self.tracked_entities
            .iter_mut()
            .find(|te| te.tracked_entity == uid)
    }

    pub fn enrollment(&self, uid: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.enrollment == uid)
    }

    pub fn enrollment_mut(&mut self, uid: &str) -> Option<&mut Enrollment> {
        self.enrollments.iter_mut().find(|e| e.enrollment == uid)
    }

    pub fn event(&self, uid: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.event == uid)
    }

    pub fn event_mut(&mut self, uid: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.event == uid)
    }

    pub fn is_empty(&self) -> bool {
        self.tracked_entities.is_empty()
            && self.enrollments.is_empty()
            && self.events.is_empty()
            && self.relationships.is_empty()
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
