// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{render, unresolved, TrackerConverter};
use crate::error::{Error, Result};
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::metadata::RelationshipEntity;
use crate::tracker::model::relationship_key;
use crate::tracker::preheat::TrackerPreheat;
use crate::tracker::{domain, model, TrackerType};

#[derive(Debug, Clone, Default)]
pub struct RelationshipConverter<C: Clock = SystemClock> {
    clock: C,
}

impl RelationshipConverter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> RelationshipConverter<C> {
    pub fn with_clock(clock: C) -> Self {
        RelationshipConverter { clock }
    }
}

impl<C: Clock> TrackerConverter for RelationshipConverter<C> {
    type Wire = domain::Relationship;
    type Model = model::Relationship;

    fn from_wire(&self, preheat: &TrackerPreheat, wire: &domain::Relationship) -> Result<model::Relationship> {
        let relationship_type = preheat
            .resolve_relationship_type(&wire.relationship_type)
            .ok_or_else(|| unresolved("relationshipType", &wire.relationship_type))?;

        let from = item(&wire.relationship, "from", &wire.from, relationship_type.from_constraint)?;
        let to = item(&wire.relationship, "to", &wire.to, relationship_type.to_constraint)?;

        let now = self.clock.now();
        let existing = preheat.relationship(&wire.relationship);

        Ok(model::Relationship {
            uid: wire.relationship.clone(),
            relationship_type: relationship_type.uid.clone(),
            from: domain::RelationshipItem::of(from.0, from.1),
            to: domain::RelationshipItem::of(to.0, to.1),
            key: relationship_key(&relationship_type.uid, from.1, to.1),
            inverted_key: relationship_key(&relationship_type.uid, to.1, from.1),
            created: existing.map_or(now, |r| r.created),
            last_updated: now,
            created_at_client: existing
                .and_then(|r| r.created_at_client)
                .or(wire.created_at),
            last_updated_by_user_info: preheat.user_info(),
            deleted: false,
        })
    }

    fn to_wire(&self, preheat: &TrackerPreheat, relationship: &model::Relationship) -> domain::Relationship {
        let relationship_type = preheat.relationship_type_by_uid(&relationship.relationship_type);
        domain::Relationship {
            relationship: relationship.uid.clone(),
            relationship_type: render(
                relationship_type,
                preheat.id_schemes().relationship_type(),
                &relationship.relationship_type,
            ),
            from: relationship.from.clone(),
            to: relationship.to.clone(),
            bidirectional: relationship_type.is_some_and(|t| t.bidirectional),
            created_at: Some(relationship.created),
            updated_at: Some(relationship.last_updated),
        }
    }
}

/// Resolves one end and checks it against the type's constraint.
fn item<'a>(
    relationship: &str,
    side: &str,
    end: &'a domain::RelationshipItem,
    constraint: RelationshipEntity,
) -> Result<(TrackerType, &'a str)> {
    let (tracker_type, uid) = end.resolve().ok_or_else(|| {
        Error::InvalidInput(format!(
            "relationship {relationship}: `{side}` must reference exactly one entity"
        ))
    })?;

    if tracker_type != constraint.tracker_type() {
        return Err(Error::InvalidInput(format!(
            "relationship {relationship}: `{side}` is a {tracker_type}, expected a {}",
            constraint.tracker_type()
        )));
    }
    Ok((tracker_type, uid))
}

#[cfg(test)]
#[path = "relationship_tests.rs"]
mod tests;
