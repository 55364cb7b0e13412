// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issues raised by program rule actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::feedback::format_message;

/// WARNING lets the entity through, ERROR rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Warning,
    Error,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Warning => "WARNING",
            IssueType::Error => "ERROR",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "WARNING" => Ok(IssueType::Warning),
            "ERROR" => Ok(IssueType::Error),
            _ => Err(Error::InvalidIssueType(s.to_string())),
        }
    }
}

/// Validation codes of rule generated issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationCode {
    /// Show error or warning, also used for rule engine failures.
    E1300,
    /// Mandatory data element missing.
    E1301,
    /// Mandatory attribute missing.
    E1306,
    /// Data element already holds a different value.
    E1307,
    /// Data element value assigned.
    E1308,
    /// Attribute already holds a different value.
    E1309,
    /// Attribute value assigned.
    E1310,
    /// Mandatory value deleted.
    E1317,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::E1300 => "E1300",
            ValidationCode::E1301 => "E1301",
            ValidationCode::E1306 => "E1306",
            ValidationCode::E1307 => "E1307",
            ValidationCode::E1308 => "E1308",
            ValidationCode::E1309 => "E1309",
            ValidationCode::E1310 => "E1310",
            ValidationCode::E1317 => "E1317",
        }
    }

    /// Message template, `{0}`, `{1}` are replaced by issue arguments.
    pub fn template(&self) -> &'static str {
        match self {
            ValidationCode::E1300 => "Generated by program rule (`{0}`) - `{1}`",
            ValidationCode::E1301 => "Generated by program rule (`{0}`) - Mandatory DataElement `{1}` is not present",
            ValidationCode::E1306 => "Generated by program rule (`{0}`) - Mandatory Attribute `{1}` is not present",
            ValidationCode::E1307 => {
                "Generated by program rule (`{0}`) - Unable to assign value to data element `{1}`. \
                 The provided value must be empty or match the calculated value `{2}`"
            }
            ValidationCode::E1308 => {
                "Generated by program rule (`{0}`) - DataElement `{1}` is being replaced in event `{2}`"
            }
            ValidationCode::E1309 => {
                "Generated by program rule (`{0}`) - Unable to assign value to attribute `{1}`. \
                 The provided value must be empty or match the calculated value `{2}`"
            }
            ValidationCode::E1310 => "Generated by program rule (`{0}`) - Attribute `{1}` is being replaced in te `{2}`",
            ValidationCode::E1317 => {
                "Generated by program rule (`{0}`) - Mandatory value `{1}` cannot be deleted"
            }
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One issue raised by one rule against one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRuleIssue {
    pub issue_type: IssueType,
    pub rule_uid: String,
    pub validation_code: ValidationCode,
    pub message: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ProgramRuleIssue {
    /// `args[0]` is conventionally the rule uid.
    pub fn new(issue_type: IssueType, rule_uid: impl Into<String>, code: ValidationCode, args: Vec<String>) -> Self {
        ProgramRuleIssue {
            issue_type,
            rule_uid: rule_uid.into(),
            validation_code: code,
            message: format_message(code.template(), &args),
            args,
        }
    }

    pub fn warning(rule_uid: impl Into<String>, code: ValidationCode, args: Vec<String>) -> Self {
        Self::new(IssueType::Warning, rule_uid, code, args)
    }

    pub fn error(rule_uid: impl Into<String>, code: ValidationCode, args: Vec<String>) -> Self {
        Self::new(IssueType::Error, rule_uid, code, args)
    }

    pub fn is_error(&self) -> bool {
        self.issue_type == IssueType::Error
    }
}

impl fmt::Display for ProgramRuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.issue_type, self.validation_code, self.message)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
