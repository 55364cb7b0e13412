// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    active = { "ACTIVE", EnrollmentStatus::Active },
    completed = { "completed", EnrollmentStatus::Completed },
    cancelled = { "Cancelled", EnrollmentStatus::Cancelled },
)]
fn enrollment_status_from_str(input: &str, expected: EnrollmentStatus) {
    assert_eq!(input.parse::<EnrollmentStatus>().unwrap(), expected);
}

#[test]
fn enrollment_status_rejects_unknown() {
    let err = "DONE".parse::<EnrollmentStatus>().unwrap_err();
    assert!(err.to_string().contains("ACTIVE, COMPLETED, CANCELLED"));
}

#[parameterized(
    active = { EventStatus::Active },
    completed = { EventStatus::Completed },
    visited = { EventStatus::Visited },
    schedule = { EventStatus::Schedule },
    overdue = { EventStatus::Overdue },
    skipped = { EventStatus::Skipped },
)]
fn event_status_round_trips_through_str(status: EventStatus) {
    assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
    assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{}\"", status.as_str()));
}

#[test]
fn event_status_rejects_unknown() {
    assert!("CLOSED".parse::<EventStatus>().is_err());
}

#[test]
fn tracker_type_serializes_screaming_snake() {
    assert_eq!(serde_json::to_string(&TrackerType::TrackedEntity).unwrap(), "\"TRACKED_ENTITY\"");
    assert_eq!(TrackerType::Event.to_string(), "EVENT");
}
