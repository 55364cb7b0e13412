// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sharing decision engine.
//!
//! Every object-level check walks the same precedence:
//!
//! 1. Override: no user, or a super user, is always granted.
//! 2. Unsupported type: no registered schema means nothing to restrict.
//! 3. Authority: the user must hold one of the schema's authorities for the
//!    capability (an empty list is satisfied by everyone).
//! 4. Shareability: non-shareable types, and objects without public access,
//!    are decided by the authority check alone.
//! 5. Ownership: the recorded owner may read and write.
//! 6. Grants: public access, a group grant or a direct user grant enables
//!    the permission bit.
//! 7. Implicit private authority: on flagged types, a user without the
//!    create authorities still passes write checks through steps 5 and 6.
//!
//! Category option combos never consult their own sharing. They are
//! accessible iff they are the default combo, have no options, or every
//! option grants the permission.
//!
//! Decisions are pure functions of user, object and schema, so one
//! [`AclService`] can be shared across threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access_string::{self, Permission};
use crate::feedback::{ErrorCode, ErrorReport};
use crate::schema::{AuthorityType, Schema, SchemaService};
use crate::sharing::{AccessSource, CategoryOption, Shareable, Sharing, User};

/// Snapshot of what one user may do with one object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    pub manage: bool,
    pub externalize: bool,
    pub write: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AccessData>,
}

impl Access {
    /// Every metadata capability set to `granted`, no data section.
    pub fn all(granted: bool) -> Self {
        Access {
            manage: granted,
            externalize: granted,
            write: granted,
            read: granted,
            update: granted,
            delete: granted,
            data: None,
        }
    }

    pub fn with_data(mut self, data: AccessData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Data capabilities, present only for data-shareable types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessData {
    pub read: bool,
    pub write: bool,
}

/// Sharing decision engine backed by a [`SchemaService`].
#[derive(Debug, Clone)]
pub struct AclService<S> {
    schema_service: S,
}

impl<S: SchemaService> AclService<S> {
    pub fn new(schema_service: S) -> Self {
        AclService { schema_service }
    }

    pub fn schema_service(&self) -> &S {
        &self.schema_service
    }

    // ─────────────────────────────────────────────────────────────────────
    // Type queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn is_supported(&self, object_type: &str) -> bool {
        self.schema_service.schema(object_type).is_some()
    }

    pub fn is_shareable(&self, object_type: &str) -> bool {
        self.schema_service
            .schema(object_type)
            .is_some_and(|s| s.shareable)
    }

    pub fn is_data_shareable(&self, object_type: &str) -> bool {
        self.schema_service
            .schema(object_type)
            .is_some_and(|s| s.data_shareable)
    }

    pub fn default_private(&self, object_type: &str) -> bool {
        self.schema_service
            .schema(object_type)
            .is_some_and(|s| s.default_private)
    }

    pub fn default_public(&self, object_type: &str) -> bool {
        !self.default_private(object_type)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Object checks
    // ─────────────────────────────────────────────────────────────────────

    pub fn can_read<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if !can_access(Some(user), schema.authority_by_type(AuthorityType::Read)) {
            debug!(user = %user.username, object = object.uid(), "read denied: missing authority");
            return false;
        }

        match object.access_source() {
            AccessSource::OptionCombo {
                is_default,
                options,
            } => check_option_combo(user, is_default, options, Permission::Read),
            AccessSource::Sharing(sharing) => {
                !schema.shareable
                    || sharing.public_access.is_none()
                    || check_metadata_permission(user, sharing, Permission::Read)
            }
        }
    }

    /// Data read. A data write grant also allows reading data.
    pub fn can_data_read<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if !can_access(Some(user), schema.authority_by_type(AuthorityType::DataRead)) {
            debug!(user = %user.username, object = object.uid(), "data read denied: missing authority");
            return false;
        }

        match object.access_source() {
            AccessSource::OptionCombo {
                is_default,
                options,
            } => {
                check_option_combo(user, is_default, options, Permission::DataRead)
                    || check_option_combo(user, is_default, options, Permission::DataWrite)
            }
            AccessSource::Sharing(sharing) => {
                schema.data_shareable
                    && (check_sharing_permission(user, sharing, Permission::DataRead)
                        || check_sharing_permission(user, sharing, Permission::DataWrite))
            }
        }
    }

    /// Data read on data-shareable types, metadata read otherwise.
    pub fn can_data_or_metadata_read<T: Shareable + ?Sized>(
        &self,
        user: Option<&User>,
        object: &T,
    ) -> bool {
        if self.is_data_shareable(object.object_type()) {
            self.can_data_read(user, object)
        } else {
            self.can_read(user, object)
        }
    }

    pub fn can_write<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if can_access(Some(user), &create_authorities(schema)) {
            return match object.access_source() {
                AccessSource::OptionCombo {
                    is_default,
                    options,
                } => check_option_combo(user, is_default, options, Permission::Write),
                AccessSource::Sharing(sharing) => self.write_common_check(schema, user, sharing),
            };
        }

        let granted = schema.implicit_private_authority && implicit_write(user, object.access_source());
        if !granted {
            debug!(user = %user.username, object = object.uid(), "write denied");
        }
        granted
    }

    pub fn can_data_write<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if !can_access(Some(user), schema.authority_by_type(AuthorityType::DataCreate)) {
            debug!(user = %user.username, object = object.uid(), "data write denied: missing authority");
            return false;
        }

        match object.access_source() {
            AccessSource::OptionCombo {
                is_default,
                options,
            } => check_option_combo(user, is_default, options, Permission::DataWrite),
            AccessSource::Sharing(sharing) => {
                schema.data_shareable && check_sharing_permission(user, sharing, Permission::DataWrite)
            }
        }
    }

    pub fn can_update<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if can_access(Some(user), &authorities_or_create(schema, AuthorityType::Update)) {
            return match object.access_source() {
                AccessSource::OptionCombo {
                    is_default,
                    options,
                } => check_option_combo(user, is_default, options, Permission::Write),
                AccessSource::Sharing(sharing) => self.write_common_check(schema, user, sharing),
            };
        }

        schema.implicit_private_authority && implicit_write(user, object.access_source())
    }

    pub fn can_delete<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        let Some((schema, user)) = self.evaluate(user, object.object_type()) else {
            return true;
        };

        if can_access(Some(user), &authorities_or_create(schema, AuthorityType::Delete)) {
            return match object.access_source() {
                AccessSource::OptionCombo {
                    is_default,
                    options,
                } => check_option_combo(user, is_default, options, Permission::Write),
                AccessSource::Sharing(sharing) => {
                    !schema.shareable
                        || sharing.public_access.is_none()
                        || (self.check_sharing_access(user, schema, sharing)
                            && check_metadata_permission(user, sharing, Permission::Write))
                }
            };
        }

        schema.implicit_private_authority && implicit_write(user, object.access_source())
    }

    /// Managing sharing follows the update rules.
    pub fn can_manage<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        self.can_update(user, object)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Type checks
    // ─────────────────────────────────────────────────────────────────────

    /// Read on a type. Unknown types are readable.
    pub fn can_read_type(&self, user: Option<&User>, object_type: &str) -> bool {
        match self.schema_service.schema(object_type) {
            None => true,
            Some(schema) => can_access(user, schema.authority_by_type(AuthorityType::Read)),
        }
    }

    /// Create on a type. Unknown types cannot be created.
    pub fn can_create(&self, user: Option<&User>, object_type: &str) -> bool {
        let Some(schema) = self.schema_service.schema(object_type) else {
            return false;
        };

        if !schema.shareable {
            return can_access(user, schema.authority_by_type(AuthorityType::Create));
        }

        self.can_make_type_public(user, object_type) || self.can_make_type_private(user, object_type)
    }

    pub fn can_make_type_public(&self, user: Option<&User>, object_type: &str) -> bool {
        self.shareable_schema(object_type)
            .is_some_and(|s| can_access(user, s.authority_by_type(AuthorityType::CreatePublic)))
    }

    pub fn can_make_type_private(&self, user: Option<&User>, object_type: &str) -> bool {
        self.shareable_schema(object_type)
            .is_some_and(|s| can_access(user, s.authority_by_type(AuthorityType::CreatePrivate)))
    }

    /// External access needs a declared externalize authority. Override
    /// users pass only when one is declared at all.
    pub fn can_make_type_external(&self, user: Option<&User>, object_type: &str) -> bool {
        self.shareable_schema(object_type).is_some_and(|s| {
            let externalize = s.authority_by_type(AuthorityType::Externalize);
            (!externalize.is_empty() && has_override(user))
                || user.is_some_and(|u| u.has_any_authority(externalize))
        })
    }

    pub fn can_make_public<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        self.can_make_type_public(user, object.object_type())
    }

    pub fn can_make_private<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        self.can_make_type_private(user, object.object_type())
    }

    pub fn can_make_external<T: Shareable + ?Sized>(&self, user: Option<&User>, object: &T) -> bool {
        self.can_make_type_external(user, object.object_type())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Snapshots and sharing maintenance
    // ─────────────────────────────────────────────────────────────────────

    /// Computes every capability of `user` on `object`.
    pub fn get_access<T: Shareable + ?Sized>(&self, object: &T, user: Option<&User>) -> Access {
        let object_type = object.object_type();
        let data_shareable = self.is_data_shareable(object_type);

        if has_override(user) {
            let access = Access::all(true);
            return if data_shareable {
                access.with_data(AccessData {
                    read: true,
                    write: true,
                })
            } else {
                access
            };
        }

        let access = Access {
            manage: self.can_manage(user, object),
            externalize: self.can_make_type_external(user, object_type),
            write: self.can_write(user, object),
            read: self.can_read(user, object),
            update: self.can_update(user, object),
            delete: self.can_delete(user, object),
            data: None,
        };

        if data_shareable {
            access.with_data(AccessData {
                read: self.can_data_read(user, object),
                write: self.can_data_write(user, object),
            })
        } else {
            access
        }
    }

    /// Restores sharing to the type's defaults for a newly created object.
    ///
    /// Public access becomes `--------`, or `rw------` when the type is
    /// public by default and `user` may make it public. The owner is only
    /// assigned when missing.
    pub fn reset_sharing<T: Shareable + ?Sized>(&self, object: &mut T, user: Option<&User>) {
        let Some(user) = user else {
            return;
        };
        let object_type = object.object_type();
        if !self.is_shareable(object_type) {
            return;
        }
        let make_public =
            self.can_make_type_public(Some(user), object_type) && self.default_public(object_type);

        let Some(sharing) = object.sharing_mut() else {
            return;
        };
        sharing.public_access = Some(access_string::DEFAULT.to_string());
        sharing.external = false;
        if sharing.owner.is_none() {
            sharing.owner = Some(user.uid.clone());
        }
        if make_public {
            sharing.public_access = Some(access_string::READ_WRITE.to_string());
        }
        sharing.reset_access_collections();
    }

    /// Makes `user` the owner and removes all access, regardless of the
    /// type's public default.
    pub fn clear_sharing<T: Shareable + ?Sized>(&self, object: &mut T, user: Option<&User>) {
        let Some(user) = user else {
            return;
        };
        if !self.is_shareable(object.object_type()) {
            return;
        }
        let Some(sharing) = object.sharing_mut() else {
            return;
        };
        sharing.owner = Some(user.uid.clone());
        sharing.public_access = Some(access_string::DEFAULT.to_string());
        sharing.external = false;
        sharing.reset_access_collections();
    }

    /// Reports every problem with the sharing `user` is about to save.
    ///
    /// A malformed public access string is reported alone since nothing
    /// else can be checked against it.
    pub fn verify_sharing<T: Shareable + ?Sized>(&self, object: &T, user: Option<&User>) -> Vec<ErrorReport> {
        let mut reports = Vec::new();

        let Some(user) = user.filter(|u| !u.is_super()) else {
            return reports;
        };
        let object_type = object.object_type();
        let Some(schema) = self.shareable_schema(object_type) else {
            return reports;
        };
        let Some(sharing) = object.sharing() else {
            return reports;
        };

        if !access_string::is_valid(sharing.public_access()) {
            reports.push(ErrorReport::new(
                object_type,
                ErrorCode::E3010,
                vec![sharing.public_access().unwrap_or_default().to_string()],
            ));
            return reports;
        }

        if !schema.data_shareable && has_any_data_sharing(sharing) {
            reports.push(ErrorReport::new(object_type, ErrorCode::E3011, vec![object_type.to_string()]));
        }

        let can_make_public = self.can_make_type_public(Some(user), object_type);
        let can_make_private = self.can_make_type_private(Some(user), object_type);
        let can_make_external = self.can_make_type_external(Some(user), object_type);
        let user_and_type = || vec![user.username.clone(), object_type.to_string()];

        if sharing.external && !can_make_external {
            reports.push(ErrorReport::new(object_type, ErrorCode::E3006, user_and_type()));
        }

        if schema.implicit_private_authority
            && !check_metadata_permission(user, sharing, Permission::Write)
            && sharing.is_public_default()
        {
            reports.push(ErrorReport::new(object_type, ErrorCode::E3001, user_and_type()));
        }

        if sharing.is_public_default() {
            if !(can_make_public || can_make_private) {
                reports.push(ErrorReport::new(object_type, ErrorCode::E3009, user_and_type()));
            }
        } else if !can_make_public {
            reports.push(ErrorReport::new(object_type, ErrorCode::E3008, user_and_type()));
        }

        reports
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    /// Steps 1 and 2: `None` means grant without looking further.
    fn evaluate<'s, 'u>(
        &'s self,
        user: Option<&'u User>,
        object_type: &str,
    ) -> Option<(&'s Schema, &'u User)> {
        let user = user.filter(|u| !u.is_super())?;
        let schema = self.schema_service.schema(object_type)?;
        Some((schema, user))
    }

    fn shareable_schema(&self, object_type: &str) -> Option<&Schema> {
        self.schema_service
            .schema(object_type)
            .filter(|s| s.shareable)
    }

    fn write_common_check(&self, schema: &Schema, user: &User, sharing: &Sharing) -> bool {
        !schema.shareable
            || (self.check_sharing_access(user, schema, sharing)
                && check_metadata_permission(user, sharing, Permission::Write))
    }

    /// Whether `user` may hold an object with these sharing settings.
    fn check_sharing_access(&self, user: &User, schema: &Schema, sharing: &Sharing) -> bool {
        let object_type = schema.name.as_str();
        let can_make_public = self.can_make_type_public(Some(user), object_type);

        let visibility_ok = if sharing.is_public_default() {
            can_make_public || self.can_make_type_private(Some(user), object_type)
        } else {
            can_make_public
        };

        visibility_ok && (!sharing.external || self.can_make_type_external(Some(user), object_type))
    }
}

fn has_override(user: Option<&User>) -> bool {
    user.map_or(true, User::is_super)
}

fn can_access(user: Option<&User>, any: &[String]) -> bool {
    has_override(user) || any.is_empty() || user.is_some_and(|u| u.has_any_authority(any))
}

/// CREATE, or CREATE_PRIVATE and CREATE_PUBLIC when CREATE is not declared.
fn create_authorities(schema: &Schema) -> Vec<String> {
    let create = schema.authority_by_type(AuthorityType::Create);
    if !create.is_empty() {
        return create.to_vec();
    }
    let mut any = schema.authority_by_type(AuthorityType::CreatePrivate).to_vec();
    any.extend_from_slice(schema.authority_by_type(AuthorityType::CreatePublic));
    any
}

/// The dedicated list for `authority_type`, or the whole create family.
fn authorities_or_create(schema: &Schema, authority_type: AuthorityType) -> Vec<String> {
    let dedicated = schema.authority_by_type(authority_type);
    if !dedicated.is_empty() {
        return dedicated.to_vec();
    }
    let mut any = schema.authority_by_type(AuthorityType::Create).to_vec();
    any.extend_from_slice(schema.authority_by_type(AuthorityType::CreatePrivate));
    any.extend_from_slice(schema.authority_by_type(AuthorityType::CreatePublic));
    any
}

/// Public access, a group grant or a direct grant enables `permission`.
fn check_sharing_permission(user: &User, sharing: &Sharing, permission: Permission) -> bool {
    if access_string::is_enabled(sharing.public_access(), permission) {
        return true;
    }

    let via_group = sharing.user_groups.values().any(|grant| {
        access_string::is_enabled(Some(&grant.access), permission) && user.is_member_of(&grant.id)
    });
    if via_group {
        return true;
    }

    sharing
        .users
        .values()
        .any(|grant| access_string::is_enabled(Some(&grant.access), permission) && grant.id == user.uid)
}

/// An object without a recorded owner is treated as owned by everyone.
fn check_owner(user: &User, sharing: &Sharing) -> bool {
    sharing.owner.is_none() || sharing.is_owned_by(user)
}

/// Owners hold every metadata permission.
fn check_metadata_permission(user: &User, sharing: &Sharing, permission: Permission) -> bool {
    check_owner(user, sharing) || check_sharing_permission(user, sharing, permission)
}

fn check_option_combo(
    user: &User,
    is_default: bool,
    options: &[CategoryOption],
    permission: Permission,
) -> bool {
    is_default
        || options.is_empty()
        || options
            .iter()
            .all(|option| check_sharing_permission(user, &option.sharing, permission))
}

/// Owner or write grantee, used on implicit-private types.
fn implicit_write(user: &User, source: AccessSource<'_>) -> bool {
    match source {
        AccessSource::Sharing(sharing) => check_metadata_permission(user, sharing, Permission::Write),
        AccessSource::OptionCombo {
            is_default,
            options,
        } => check_option_combo(user, is_default, options, Permission::Write),
    }
}

fn has_any_data_sharing(sharing: &Sharing) -> bool {
    sharing
        .public_access()
        .is_some_and(access_string::has_data_sharing)
        || sharing
            .users
            .values()
            .any(|grant| access_string::has_data_sharing(&grant.access))
        || sharing
            .user_groups
            .values()
            .any(|grant| access_string::has_data_sharing(&grant.access))
}

#[cfg(test)]
#[path = "acl_tests.rs"]
mod tests;
