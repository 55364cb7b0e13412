// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::debug;

use super::TrackerConverter;
use crate::error::Result;
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::id::validate_uid;
use crate::tracker::preheat::TrackerPreheat;
use crate::tracker::{domain, model};

/// Notes are append-only: the author is always the importing user.
#[derive(Debug, Clone, Default)]
pub struct NoteConverter<C: Clock = SystemClock> {
    clock: C,
}

impl NoteConverter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> NoteConverter<C> {
    pub fn with_clock(clock: C) -> Self {
        NoteConverter { clock }
    }

    /// Converts the notes that do not exist yet.
    pub fn from_wire_new(&self, preheat: &TrackerPreheat, notes: &[domain::Note]) -> Result<Vec<model::Note>> {
        notes
            .iter()
            .filter(|n| {
                let known = preheat.has_note(&n.note);
                if known {
                    debug!(note = %n.note, "note already stored, skipping");
                }
                !known
            })
            .map(|n| self.from_wire(preheat, n))
            .collect()
    }
}

impl<C: Clock> TrackerConverter for NoteConverter<C> {
    type Wire = domain::Note;
    type Model = model::Note;

    fn from_wire(&self, preheat: &TrackerPreheat, wire: &domain::Note) -> Result<model::Note> {
        let uid = validate_uid(&wire.note)?;
        let now = self.clock.now();

        Ok(model::Note {
            uid: uid.to_string(),
            note_text: wire.value.clone(),
            creator: preheat.username().map(str::to_string),
            created: wire.stored_at.unwrap_or(now),
            last_updated: now,
            last_updated_by: preheat.user_info(),
        })
    }

    fn to_wire(&self, _preheat: &TrackerPreheat, note: &model::Note) -> domain::Note {
        domain::Note {
            note: note.uid.clone(),
            value: note.note_text.clone(),
            stored_by: note.creator.clone(),
            stored_at: Some(note.created),
            created_by: note.last_updated_by.clone(),
        }
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
