// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use sanitas_core::{AclService, SharedObject};

use crate::error::Result;
use crate::fixtures::{self, read_json};

/// Prints every sharing violation on the object. Violations are reported,
/// not treated as a failure.
pub fn run(schemas: &Path, user: Option<&Path>, object: &Path) -> Result<()> {
    let acl = AclService::new(fixtures::schemas(schemas)?);
    let user = fixtures::user(user)?;
    let object: SharedObject = read_json(object)?;

    let reports = acl.verify_sharing(&object, user.as_ref());
    for report in &reports {
        tracing::info!(uid = %object.uid, code = %report.error_code, "{}", report.message);
    }
    fixtures::print_json(&reports)
}
