// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion between wire payloads and persisted tracker entities.
//!
//! `from_wire` resolves metadata references through the preheat and fails
//! with [`Error::UnresolvedReference`] when a mandatory one is missing.
//! Optional references that cannot be resolved are dropped with a warning.
//! Audit fields always come from the preheat's current user.

mod enrollment;
mod event;
mod note;
mod relationship;

pub use enrollment::EnrollmentConverter;
pub use event::EventConverter;
pub use note::NoteConverter;
pub use relationship::RelationshipConverter;

use crate::error::{Error, Result};
use crate::tracker::id::IdSchemeParam;
use crate::tracker::metadata::IdentifiableObject;
use crate::tracker::preheat::TrackerPreheat;

/// Two-way mapping between a wire type and a persisted type.
pub trait TrackerConverter {
    type Wire;
    type Model;

    fn from_wire(&self, preheat: &TrackerPreheat, wire: &Self::Wire) -> Result<Self::Model>;

    fn to_wire(&self, preheat: &TrackerPreheat, model: &Self::Model) -> Self::Wire;

    /// Converts every entity, stopping at the first failure.
    fn from_wire_all(&self, preheat: &TrackerPreheat, wires: &[Self::Wire]) -> Result<Vec<Self::Model>> {
        wires.iter().map(|w| self.from_wire(preheat, w)).collect()
    }

    fn to_wire_all(&self, preheat: &TrackerPreheat, models: &[Self::Model]) -> Vec<Self::Wire> {
        models.iter().map(|m| self.to_wire(preheat, m)).collect()
    }
}

pub(crate) fn unresolved(kind: &'static str, identifier: &str) -> Error {
    Error::UnresolvedReference {
        kind,
        identifier: identifier.to_string(),
    }
}

/// Renders a uid reference in the configured scheme, falling back to the
/// uid when the object is not preheated or has no value under the scheme.
pub(crate) fn render<T: IdentifiableObject + ?Sized>(object: Option<&T>, param: &IdSchemeParam, uid: &str) -> String {
    object
        .and_then(|o| param.identifier_of(o))
        .unwrap_or_else(|| uid.to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
