// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use sanitas_core::sharing::{CategoryOption, CategoryOptionCombo};
use sanitas_core::{Access, AclService, SchemaService, Shareable, SharedObject, User};

use crate::cli::ObjectKind;
use crate::error::Result;
use crate::fixtures::{self, read_json};

/// Prints the access a user has on an object.
pub fn run(schemas: &Path, user: Option<&Path>, object: &Path, kind: ObjectKind) -> Result<()> {
    let acl = AclService::new(fixtures::schemas(schemas)?);
    let user = fixtures::user(user)?;

    let access = match kind {
        ObjectKind::Object => access_for(&acl, user.as_ref(), &read_json::<SharedObject>(object)?),
        ObjectKind::CategoryOption => access_for(&acl, user.as_ref(), &read_json::<CategoryOption>(object)?),
        ObjectKind::CategoryOptionCombo => {
            access_for(&acl, user.as_ref(), &read_json::<CategoryOptionCombo>(object)?)
        }
    };
    fixtures::print_json(&access)
}

pub(crate) fn access_for<S: SchemaService, T: Shareable>(acl: &AclService<S>, user: Option<&User>, object: &T) -> Access {
    let access = acl.get_access(object, user);
    tracing::debug!(
        object_type = object.object_type(),
        uid = object.uid(),
        user = user.map(|u| u.username.as_str()),
        read = access.read,
        write = access.write,
        "computed access"
    );
    access
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
