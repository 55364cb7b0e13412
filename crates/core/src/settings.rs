// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! System-wide settings consulted during import.

use serde::{Deserialize, Serialize};

/// Settings that change how the import pipeline behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// Program rule assignments replace values that differ from the
    /// computed one instead of reporting an error.
    pub rule_engine_assign_overwrite: bool,
}

impl SystemSettings {
    pub fn with_assign_overwrite(mut self, overwrite: bool) -> Self {
        self.rule_engine_assign_overwrite = overwrite;
        self
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
