// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{render, unresolved, NoteConverter, TrackerConverter};
use crate::error::Result;
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::model::UserInfoSnapshot;
use crate::tracker::preheat::TrackerPreheat;
use crate::tracker::{domain, model, EventStatus};

#[derive(Debug, Clone, Default)]
pub struct EventConverter<C: Clock = SystemClock> {
    clock: C,
}

impl EventConverter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> EventConverter<C> {
    pub fn with_clock(clock: C) -> Self {
        EventConverter { clock }
    }

    /// The payload's combo when one is given, otherwise the system default.
    fn attribute_option_combo(&self, preheat: &TrackerPreheat, wire: &domain::Event) -> Result<Option<String>> {
        match wire.attribute_option_combo.as_deref().filter(|c| !c.is_empty()) {
            Some(raw) => preheat
                .resolve_category_option_combo(raw)
                .map(|combo| Some(combo.uid.clone()))
                .ok_or_else(|| unresolved("attributeOptionCombo", raw)),
            None => Ok(preheat.default_category_option_combo().map(str::to_string)),
        }
    }
}

impl<C: Clock> TrackerConverter for EventConverter<C> {
    type Wire = domain::Event;
    type Model = model::Event;

    fn from_wire(&self, preheat: &TrackerPreheat, wire: &domain::Event) -> Result<model::Event> {
        let program_stage = preheat
            .resolve_program_stage(&wire.program_stage)
            .ok_or_else(|| unresolved("programStage", &wire.program_stage))?;
        let org_unit = preheat
            .resolve_org_unit(&wire.org_unit)
            .ok_or_else(|| unresolved("orgUnit", &wire.org_unit))?;
        let attribute_option_combo = self.attribute_option_combo(preheat, wire)?;

        let now = self.clock.now();
        let user_info = preheat.user_info();
        let username = preheat.username().map(str::to_string);

        let mut event = match preheat.event(&wire.event) {
            Some(stored) => stored.clone(),
            None => {
                debug!(event = %wire.event, "new event");
                model::Event {
                    uid: wire.event.clone(),
                    enrollment: None,
                    program_stage: String::new(),
                    organisation_unit: String::new(),
                    attribute_option_combo: None,
                    status: EventStatus::Active,
                    occurred_date: None,
                    scheduled_date: None,
                    completed_date: None,
                    completed_by: None,
                    stored_by: username.clone(),
                    deleted: false,
                    created: now,
                    last_updated: now,
                    created_at_client: wire.created_at,
                    last_updated_at_client: None,
                    created_by_user_info: user_info.clone(),
                    last_updated_by_user_info: None,
                    event_data_values: Vec::new(),
                    notes: Vec::new(),
                }
            }
        };

        event.enrollment = wire.enrollment.clone().or(event.enrollment);
        event.program_stage = program_stage.uid.clone();
        event.organisation_unit = org_unit.uid.clone();
        event.attribute_option_combo = attribute_option_combo;
        event.occurred_date = wire.occurred_at;
        event.scheduled_date = wire.scheduled_at;
        event.last_updated = now;
        event.last_updated_at_client = wire.updated_at;
        event.last_updated_by_user_info = user_info.clone();

        apply_status(&mut event, wire, now, username.as_deref());
        merge_data_values(&mut event, preheat, &wire.data_values, now, username.as_deref(), user_info);

        let notes = NoteConverter::with_clock(&self.clock).from_wire_new(preheat, &wire.notes)?;
        event.notes.extend(notes);

        Ok(event)
    }

    fn to_wire(&self, preheat: &TrackerPreheat, event: &model::Event) -> domain::Event {
        let ids = preheat.id_schemes();
        let stage = preheat.program_stage_by_uid(&event.program_stage);
        let program = stage
            .map(|s| render(preheat.program_by_uid(&s.program), ids.program(), &s.program))
            .unwrap_or_default();

        let data_values = event
            .event_data_values
            .iter()
            .map(|dv| domain::DataValue {
                data_element: render(
                    preheat.data_element_by_uid(&dv.data_element),
                    ids.data_element(),
                    &dv.data_element,
                ),
                value: dv.value.clone(),
                provided_elsewhere: dv.provided_elsewhere,
                stored_by: dv.stored_by.clone(),
                created_at: Some(dv.created),
                updated_at: Some(dv.last_updated),
            })
            .collect();

        domain::Event {
            event: event.uid.clone(),
            enrollment: event.enrollment.clone(),
            program,
            program_stage: render(stage, ids.program_stage(), &event.program_stage),
            org_unit: render(
                preheat.org_unit_by_uid(&event.organisation_unit),
                ids.org_unit(),
                &event.organisation_unit,
            ),
            status: event.status,
            occurred_at: event.occurred_date,
            scheduled_at: event.scheduled_date,
            completed_at: event.completed_date,
            completed_by: event.completed_by.clone(),
            attribute_option_combo: event.attribute_option_combo.as_deref().map(|uid| {
                render(
                    preheat.category_option_combo_by_uid(uid),
                    ids.category_option_combo(),
                    uid,
                )
            }),
            stored_by: event.stored_by.clone(),
            deleted: event.deleted,
            data_values,
            notes: NoteConverter::with_clock(&self.clock).to_wire_all(preheat, &event.notes),
            created_at: Some(event.created),
            updated_at: Some(event.last_updated),
        }
    }
}

/// Completion is stamped when an event becomes completed, or when a
/// completed event lacks it. Any other status clears it.
fn apply_status(event: &mut model::Event, wire: &domain::Event, now: DateTime<Utc>, username: Option<&str>) {
    let was_completed = event.status == EventStatus::Completed;
    event.status = wire.status;

    if wire.status != EventStatus::Completed {
        event.completed_by = None;
        event.completed_date = None;
        return;
    }
    if !was_completed || event.completed_date.is_none() {
        event.completed_date = Some(wire.completed_at.unwrap_or(now));
        event.completed_by = username.map(str::to_string);
    }
}

fn merge_data_values(
    event: &mut model::Event,
    preheat: &TrackerPreheat,
    data_values: &[domain::DataValue],
    now: DateTime<Utc>,
    username: Option<&str>,
    user_info: Option<UserInfoSnapshot>,
) {
    for dv in data_values {
        let Some(data_element) = preheat.resolve_data_element(&dv.data_element) else {
            warn!(event = %event.uid, data_element = %dv.data_element, "unresolved data element, dropping value");
            continue;
        };

        match event
            .event_data_values
            .iter_mut()
            .find(|existing| existing.data_element == data_element.uid)
        {
            Some(existing) => {
                existing.value = dv.value.clone();
                existing.provided_elsewhere = dv.provided_elsewhere;
                existing.last_updated = now;
                existing.last_updated_by_user_info = user_info.clone();
            }
            None => event.event_data_values.push(model::EventDataValue {
                data_element: data_element.uid.clone(),
                value: dv.value.clone(),
                provided_elsewhere: dv.provided_elsewhere,
                stored_by: username.map(str::to_string),
                created: dv.created_at.unwrap_or(now),
                last_updated: now,
                created_by_user_info: user_info.clone(),
                last_updated_by_user_info: user_info.clone(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
