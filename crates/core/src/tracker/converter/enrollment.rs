// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{render, unresolved, NoteConverter, TrackerConverter};
use crate::error::Result;
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::preheat::TrackerPreheat;
use crate::tracker::{domain, model, EnrollmentStatus};

#[derive(Debug, Clone, Default)]
pub struct EnrollmentConverter<C: Clock = SystemClock> {
    clock: C,
}

impl EnrollmentConverter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> EnrollmentConverter<C> {
    pub fn with_clock(clock: C) -> Self {
        EnrollmentConverter { clock }
    }
}

impl<C: Clock> TrackerConverter for EnrollmentConverter<C> {
    type Wire = domain::Enrollment;
    type Model = model::Enrollment;

    fn from_wire(&self, preheat: &TrackerPreheat, wire: &domain::Enrollment) -> Result<model::Enrollment> {
        let program = preheat
            .resolve_program(&wire.program)
            .ok_or_else(|| unresolved("program", &wire.program))?;
        let org_unit = preheat
            .resolve_org_unit(&wire.org_unit)
            .ok_or_else(|| unresolved("orgUnit", &wire.org_unit))?;

        let now = self.clock.now();
        let user_info = preheat.user_info();
        let username = preheat.username().map(str::to_string);

        let existing = preheat.enrollment(&wire.enrollment);
        let mut enrollment = match existing {
            Some(stored) => stored.clone(),
            None => {
                debug!(enrollment = %wire.enrollment, "new enrollment");
                model::Enrollment {
                    uid: wire.enrollment.clone(),
                    tracked_entity: None,
                    program: String::new(),
                    organisation_unit: String::new(),
                    status: EnrollmentStatus::Active,
                    enrollment_date: None,
                    incident_date: None,
                    completed_date: None,
                    completed_by: None,
                    stored_by: username.clone(),
                    follow_up: false,
                    deleted: false,
                    created: now,
                    last_updated: now,
                    created_at_client: wire.created_at,
                    last_updated_at_client: None,
                    created_by_user_info: user_info.clone(),
                    last_updated_by_user_info: None,
                    notes: Vec::new(),
                }
            }
        };

        enrollment.tracked_entity = wire
            .tracked_entity
            .clone()
            .or(enrollment.tracked_entity);
        enrollment.program = program.uid.clone();
        enrollment.organisation_unit = org_unit.uid.clone();
        enrollment.enrollment_date = wire.enrolled_at.or(enrollment.enrollment_date);
        enrollment.incident_date = wire
            .occurred_at
            .or(enrollment.incident_date)
            .or(enrollment.enrollment_date);
        enrollment.follow_up = wire.follow_up;
        enrollment.last_updated = now;
        enrollment.last_updated_at_client = wire.updated_at;
        enrollment.last_updated_by_user_info = user_info;

        let previous = existing.map(|e| e.status);
        if previous != Some(wire.status) {
            apply_status(&mut enrollment, wire.status, wire.completed_at.unwrap_or(now), username);
        }

        let notes = NoteConverter::with_clock(&self.clock).from_wire_new(preheat, &wire.notes)?;
        enrollment.notes.extend(notes);

        Ok(enrollment)
    }

    fn to_wire(&self, preheat: &TrackerPreheat, enrollment: &model::Enrollment) -> domain::Enrollment {
        let ids = preheat.id_schemes();
        let notes = NoteConverter::with_clock(&self.clock);

        domain::Enrollment {
            enrollment: enrollment.uid.clone(),
            tracked_entity: enrollment.tracked_entity.clone(),
            program: render(preheat.program_by_uid(&enrollment.program), ids.program(), &enrollment.program),
            org_unit: render(
                preheat.org_unit_by_uid(&enrollment.organisation_unit),
                ids.org_unit(),
                &enrollment.organisation_unit,
            ),
            status: enrollment.status,
            enrolled_at: enrollment.enrollment_date,
            occurred_at: enrollment.incident_date,
            completed_at: enrollment.completed_date,
            completed_by: enrollment.completed_by.clone(),
            stored_by: enrollment.stored_by.clone(),
            follow_up: enrollment.follow_up,
            deleted: enrollment.deleted,
            attributes: Vec::new(),
            notes: notes.to_wire_all(preheat, &enrollment.notes),
            created_at: Some(enrollment.created),
            updated_at: Some(enrollment.last_updated),
        }
    }
}

/// Completing stamps who and when. Cancelling keeps a completion date but
/// no completer. Reactivating clears both.
fn apply_status(
    enrollment: &mut model::Enrollment,
    status: EnrollmentStatus,
    completed_at: DateTime<Utc>,
    username: Option<String>,
) {
    enrollment.status = status;
    match status {
        EnrollmentStatus::Completed => {
            enrollment.completed_date = Some(completed_at);
            enrollment.completed_by = username;
        }
        EnrollmentStatus::Cancelled => {
            enrollment.completed_date = Some(completed_at);
            enrollment.completed_by = None;
        }
        EnrollmentStatus::Active => {
            enrollment.completed_date = None;
            enrollment.completed_by = None;
        }
    }
}

#[cfg(test)]
#[path = "enrollment_tests.rs"]
mod tests;
