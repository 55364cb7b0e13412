// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker import pipeline: identifiers, preheat, bundle and converters.
//!
//! Wire payloads ([`domain`]) reference metadata by whatever identifier the
//! caller configured. Converters resolve those references through the
//! [`TrackerPreheat`](preheat::TrackerPreheat) and produce persisted entities
//! ([`model`]) that always reference metadata by uid.

pub mod bundle;
pub mod clock;
pub mod converter;
pub mod domain;
pub mod id;
pub mod metadata;
pub mod model;
pub mod preheat;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use bundle::{TrackerBundle, TrackerImportStrategy};
pub use clock::{Clock, SystemClock};
pub use id::{IdSchemeParam, MetadataIdentifier, TrackerIdScheme, TrackerIdSchemeParams};
pub use preheat::{PreheatSnapshot, TrackerPreheat};

/// Kind of tracker entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerType {
    TrackedEntity,
    Enrollment,
    Event,
    Relationship,
}

impl TrackerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerType::TrackedEntity => "TRACKED_ENTITY",
            TrackerType::Enrollment => "ENROLLMENT",
            TrackerType::Event => "EVENT",
            TrackerType::Relationship => "RELATIONSHIP",
        }
    }
}

impl fmt::Display for TrackerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an enrollment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Completed => "COMPLETED",
            EnrollmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(EnrollmentStatus::Active),
            "COMPLETED" => Ok(EnrollmentStatus::Completed),
            "CANCELLED" => Ok(EnrollmentStatus::Cancelled),
            _ => Err(Error::InvalidEnrollmentStatus(s.to_string())),
        }
    }
}

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Active,
    Completed,
    Visited,
    Schedule,
    Overdue,
    Skipped,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "ACTIVE",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Visited => "VISITED",
            EventStatus::Schedule => "SCHEDULE",
            EventStatus::Overdue => "OVERDUE",
            EventStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(EventStatus::Active),
            "COMPLETED" => Ok(EventStatus::Completed),
            "VISITED" => Ok(EventStatus::Visited),
            "SCHEDULE" => Ok(EventStatus::Schedule),
            "OVERDUE" => Ok(EventStatus::Overdue),
            "SKIPPED" => Ok(EventStatus::Skipped),
            _ => Err(Error::InvalidEventStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
