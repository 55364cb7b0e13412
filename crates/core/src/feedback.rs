// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured reports for sharing configuration violations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable machine-readable sharing violation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Neither owner nor write grantee on an implicit-private type.
    E3001,
    /// External access without the externalize authority.
    E3006,
    /// Public access without the make-public authority.
    E3008,
    /// Private object without the make-public or make-private authority.
    E3009,
    /// Malformed public access string.
    E3010,
    /// Data sharing bits on a type without data sharing.
    E3011,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
        }
    }

    /// Message template, `{0}`, `{1}` are replaced by report arguments.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "User `{0}` is not allowed to update object `{1}`",
            ErrorCode::E3006 => "User `{0}` is not allowed to make objects of type `{1}` externally available",
            ErrorCode::E3008 => "User `{0}` is not allowed to make public objects of type `{1}`",
            ErrorCode::E3009 => "User `{0}` is not allowed to make private objects of type `{1}`",
            ErrorCode::E3010 => "Invalid access string `{0}`",
            ErrorCode::E3011 => {
                "Data sharing is not enabled for type `{0}`, but one or more access strings contains data sharing read or write"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One violation found on one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error_code: ErrorCode,
    /// Type name of the offending object.
    pub main_klass: String,
    pub message: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ErrorReport {
    pub fn new(main_klass: impl Into<String>, error_code: ErrorCode, args: Vec<String>) -> Self {
        ErrorReport {
            error_code,
            main_klass: main_klass.into(),
            message: format_message(error_code.template(), &args),
            args,
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)
    }
}

/// Substitutes `{n}` placeholders with positional arguments.
pub(crate) fn format_message(template: &str, args: &[String]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |msg, (i, arg)| msg.replace(&format!("{{{i}}}"), arg))
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
