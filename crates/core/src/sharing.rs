// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Principals and the sharing model attached to metadata objects.
//!
//! Access strings are stored verbatim (`Option<String>`) so that malformed
//! persisted values survive long enough for `verify_sharing` to report them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::access_string;

/// Authority held by super users. Holders bypass every sharing check.
pub const AUTHORITY_ALL: &str = "ALL";

/// Singular type names used as schema keys.
pub mod object_type {
    pub const CATEGORY_OPTION: &str = "categoryOption";
    pub const CATEGORY_OPTION_COMBO: &str = "categoryOptionCombo";
    pub const DATA_ELEMENT: &str = "dataElement";
    pub const DATA_SET: &str = "dataSet";
    pub const ORGANISATION_UNIT: &str = "organisationUnit";
    pub const PROGRAM: &str = "program";
    pub const PROGRAM_STAGE: &str = "programStage";
    pub const RELATIONSHIP_TYPE: &str = "relationshipType";
    pub const TRACKED_ENTITY_ATTRIBUTE: &str = "trackedEntityAttribute";
    pub const TRACKED_ENTITY_TYPE: &str = "trackedEntityType";
}

/// A user as seen by the authorization engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Union of authorities over all of the user's roles.
    #[serde(default)]
    pub authorities: BTreeSet<String>,
    /// Uids of the user groups this user is a member of.
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

impl User {
    pub fn new(uid: impl Into<String>, username: impl Into<String>) -> Self {
        User {
            uid: uid.into(),
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_authorities<I, A>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.authorities.extend(authorities.into_iter().map(Into::into));
        self
    }

    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Holds the `ALL` authority.
    pub fn is_super(&self) -> bool {
        self.authorities.contains(AUTHORITY_ALL)
    }

    /// Holds at least one of `any`. False for an empty list.
    pub fn has_any_authority(&self, any: &[String]) -> bool {
        any.iter().any(|a| self.authorities.contains(a))
    }

    pub fn is_member_of(&self, group_uid: &str) -> bool {
        self.groups.contains(group_uid)
    }
}

/// Grant of an access string to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccess {
    /// Uid of the user.
    pub id: String,
    pub access: String,
}

/// Grant of an access string to every member of a user group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupAccess {
    /// Uid of the user group.
    pub id: String,
    pub access: String,
}

/// Sharing settings owned by a shareable object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sharing {
    #[serde(default, rename = "public", skip_serializing_if = "Option::is_none")]
    pub public_access: Option<String>,
    #[serde(default)]
    pub external: bool,
    /// Uid of the owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Direct user grants keyed by user uid.
    #[serde(default)]
    pub users: BTreeMap<String, UserAccess>,
    /// Group grants keyed by group uid.
    #[serde(default)]
    pub user_groups: BTreeMap<String, UserGroupAccess>,
}

impl Sharing {
    pub fn with_public_access(mut self, access: impl Into<String>) -> Self {
        self.public_access = Some(access.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn with_user_access(mut self, user_uid: impl Into<String>, access: impl Into<String>) -> Self {
        let id = user_uid.into();
        self.users.insert(
            id.clone(),
            UserAccess {
                id,
                access: access.into(),
            },
        );
        self
    }

    pub fn with_user_group_access(mut self, group_uid: impl Into<String>, access: impl Into<String>) -> Self {
        let id = group_uid.into();
        self.user_groups.insert(
            id.clone(),
            UserGroupAccess {
                id,
                access: access.into(),
            },
        );
        self
    }

    pub fn public_access(&self) -> Option<&str> {
        self.public_access.as_deref()
    }

    /// Public access equals `--------`.
    pub fn is_public_default(&self) -> bool {
        self.public_access() == Some(access_string::DEFAULT)
    }

    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner.as_deref() == Some(user.uid.as_str())
    }

    /// Drops every user and group grant.
    pub fn reset_access_collections(&mut self) {
        self.users.clear();
        self.user_groups.clear();
    }
}

/// Where the engine reads permissions from for a given object.
#[derive(Debug, Clone, Copy)]
pub enum AccessSource<'a> {
    /// The object's own sharing settings.
    Sharing(&'a Sharing),
    /// Derived from the category options of a category option combo. Every
    /// option must grant the permission unless the combo is the default one
    /// or has no options.
    OptionCombo {
        is_default: bool,
        options: &'a [CategoryOption],
    },
}

/// An object the sharing engine can make decisions about.
pub trait Shareable {
    /// Schema key of the object's type.
    fn object_type(&self) -> &str;

    fn uid(&self) -> &str;

    fn access_source(&self) -> AccessSource<'_>;

    /// Mutable sharing settings, `None` for objects with derived access.
    fn sharing_mut(&mut self) -> Option<&mut Sharing>;

    /// The object's own sharing settings, `None` for derived access.
    fn sharing(&self) -> Option<&Sharing> {
        match self.access_source() {
            AccessSource::Sharing(sharing) => Some(sharing),
            AccessSource::OptionCombo { .. } => None,
        }
    }
}

/// A shareable object known only by type name, uid and sharing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub sharing: Sharing,
}

impl SharedObject {
    pub fn new(object_type: impl Into<String>, uid: impl Into<String>) -> Self {
        SharedObject {
            object_type: object_type.into(),
            uid: uid.into(),
            name: None,
            sharing: Sharing::default(),
        }
    }

    pub fn with_sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = sharing;
        self
    }
}

impl Shareable for SharedObject {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn uid(&self) -> &str {
        &self.uid
    }

    fn access_source(&self) -> AccessSource<'_> {
        AccessSource::Sharing(&self.sharing)
    }

    fn sharing_mut(&mut self) -> Option<&mut Sharing> {
        Some(&mut self.sharing)
    }
}

/// A category option. Carries its own sharing, which also gates every
/// category option combo it is part of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sharing: Sharing,
}

impl CategoryOption {
    pub fn new(uid: impl Into<String>, sharing: Sharing) -> Self {
        CategoryOption {
            uid: uid.into(),
            sharing,
            ..Default::default()
        }
    }
}

impl Shareable for CategoryOption {
    fn object_type(&self) -> &str {
        object_type::CATEGORY_OPTION
    }

    fn uid(&self) -> &str {
        &self.uid
    }

    fn access_source(&self) -> AccessSource<'_> {
        AccessSource::Sharing(&self.sharing)
    }

    fn sharing_mut(&mut self) -> Option<&mut Sharing> {
        Some(&mut self.sharing)
    }
}

/// A combination of one option per category. Has no sharing of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionCombo {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    /// The system default combo.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub category_options: Vec<CategoryOption>,
}

impl CategoryOptionCombo {
    pub fn new(uid: impl Into<String>, category_options: Vec<CategoryOption>) -> Self {
        CategoryOptionCombo {
            uid: uid.into(),
            category_options,
            ..Default::default()
        }
    }

    pub fn default_combo(uid: impl Into<String>) -> Self {
        CategoryOptionCombo {
            uid: uid.into(),
            name: "default".to_string(),
            is_default: true,
            ..Default::default()
        }
    }
}

impl Shareable for CategoryOptionCombo {
    fn object_type(&self) -> &str {
        object_type::CATEGORY_OPTION_COMBO
    }

    fn uid(&self) -> &str {
        &self.uid
    }

    fn access_source(&self) -> AccessSource<'_> {
        AccessSource::OptionCombo {
            is_default: self.is_default,
            options: &self.category_options,
        }
    }

    fn sharing_mut(&mut self) -> Option<&mut Sharing> {
        None
    }
}

#[cfg(test)]
#[path = "sharing_tests.rs"]
mod tests;
