// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sanitas-core operations.
//!
//! Only malformed input ends up here. Authorization outcomes are booleans,
//! sharing violations are [`ErrorReport`](crate::feedback::ErrorReport)s and
//! program rule outcomes are [`ProgramRuleIssue`](crate::programrule::ProgramRuleIssue)s.

use thiserror::Error;

/// All possible errors that can occur in sanitas-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid access string: '{0}'\n  hint: expected 8 characters like 'rwrw----'")]
    InvalidAccessString(String),

    #[error("invalid id scheme: '{0}'\n  hint: valid schemes are: UID, CODE, NAME, ATTRIBUTE:<uid>")]
    InvalidIdScheme(String),

    #[error("invalid uid: '{0}'\n  hint: a uid is 11 alphanumeric characters starting with a letter")]
    InvalidUid(String),

    #[error("invalid enrollment status: '{0}'\n  hint: valid statuses are: ACTIVE, COMPLETED, CANCELLED")]
    InvalidEnrollmentStatus(String),

    #[error("invalid event status: '{0}'\n  hint: valid statuses are: ACTIVE, COMPLETED, VISITED, SCHEDULE, OVERDUE, SKIPPED")]
    InvalidEventStatus(String),

    #[error("invalid import strategy: '{0}'\n  hint: valid strategies are: CREATE, UPDATE, CREATE_AND_UPDATE, DELETE")]
    InvalidImportStrategy(String),

    #[error("invalid authority type: '{0}'")]
    InvalidAuthorityType(String),

    #[error("invalid notification trigger: '{0}'")]
    InvalidNotificationTrigger(String),

    #[error("invalid notification recipient: '{0}'")]
    InvalidNotificationRecipient(String),

    #[error("invalid issue type: '{0}'\n  hint: valid types are: WARNING, ERROR")]
    InvalidIssueType(String),

    #[error("unresolved {kind} reference: {identifier}")]
    UnresolvedReference { kind: &'static str, identifier: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for sanitas-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
