// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Eight character permission strings used by sharing grants.
//!
//! Positions 0..4 hold `r`/`w` for metadata read, metadata write, data read
//! and data write. Positions 4..8 are reserved and always `-`:
//!
//! ```text
//! r w r w - - - -
//! │ │ │ └ data write
//! │ │ └── data read
//! │ └──── metadata write
//! └────── metadata read
//! ```
//!
//! Persisted strings are kept verbatim on the sharing model, so the free
//! functions in this module work on `Option<&str>`. A missing access string
//! means no restriction is configured and every permission check passes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const LENGTH: usize = 8;
const RESERVED_SUFFIX: &str = "----";
const DISABLED: u8 = b'-';

/// No access at all.
pub const DEFAULT: &str = "--------";
/// Metadata read.
pub const READ: &str = "r-------";
/// Metadata write.
pub const WRITE: &str = "-w------";
/// Metadata read and write.
pub const READ_WRITE: &str = "rw------";
/// Data read.
pub const DATA_READ: &str = "--r-----";
/// Data write.
pub const DATA_WRITE: &str = "---w----";
/// Data read and write.
pub const DATA_READ_WRITE: &str = "--rw----";
/// Every permission.
pub const FULL: &str = "rwrw----";
/// Public access given to new category options.
pub const CATEGORY_OPTION_DEFAULT: &str = "rwrw----";
/// Public access for categories that cannot carry data sharing.
pub const CATEGORY_NO_DATA_SHARING_DEFAULT: &str = "rw------";

/// A single permission bit of an access string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Read,
    Write,
    DataRead,
    DataWrite,
}

impl Permission {
    /// All permissions in position order.
    pub const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Write,
        Permission::DataRead,
        Permission::DataWrite,
    ];

    /// Character index of this permission in an access string.
    pub fn position(&self) -> usize {
        match self {
            Permission::Read => 0,
            Permission::Write => 1,
            Permission::DataRead => 2,
            Permission::DataWrite => 3,
        }
    }

    /// The letter written at [`Permission::position`] when enabled.
    pub fn letter(&self) -> u8 {
        match self {
            Permission::Read | Permission::DataRead => b'r',
            Permission::Write | Permission::DataWrite => b'w',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "READ",
            Permission::Write => "WRITE",
            Permission::DataRead => "DATA_READ",
            Permission::DataWrite => "DATA_WRITE",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated, immutable access string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessString([u8; LENGTH]);

impl AccessString {
    /// `--------`
    pub const DEFAULT: AccessString = AccessString(*b"--------");

    /// Starts a builder with every permission disabled.
    pub fn builder() -> AccessStringBuilder {
        AccessStringBuilder::new()
    }

    pub fn as_str(&self) -> &str {
        // Every constructor only ever writes ASCII.
        std::str::from_utf8(&self.0).unwrap_or(DEFAULT)
    }

    pub fn is_enabled(&self, permission: Permission) -> bool {
        self.0[permission.position()] == permission.letter()
    }

    /// True when data read or data write is enabled.
    pub fn has_data_sharing(&self) -> bool {
        self.is_enabled(Permission::DataRead) || self.is_enabled(Permission::DataWrite)
    }

    /// Copy of this access string with both data bits cleared.
    pub fn without_data_sharing(&self) -> AccessString {
        AccessStringBuilder::from(*self)
            .disable(Permission::DataRead)
            .disable(Permission::DataWrite)
            .build()
    }

    /// Enabled permissions in position order.
    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.is_enabled(*p))
    }
}

impl Default for AccessString {
    fn default() -> Self {
        AccessString::DEFAULT
    }
}

impl fmt::Debug for AccessString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessString({})", self.as_str())
    }
}

impl fmt::Display for AccessString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !is_valid(Some(s)) {
            return Err(Error::InvalidAccessString(s.to_string()));
        }
        let mut buf = [DISABLED; LENGTH];
        buf.copy_from_slice(s.as_bytes());
        Ok(AccessString(buf))
    }
}

impl TryFrom<String> for AccessString {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccessString> for String {
    fn from(value: AccessString) -> Self {
        value.as_str().to_string()
    }
}

impl Serialize for AccessString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccessString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Accumulates permission bits and freezes them into an [`AccessString`].
#[derive(Debug, Clone, Copy)]
pub struct AccessStringBuilder {
    buf: [u8; LENGTH],
}

impl AccessStringBuilder {
    pub fn new() -> Self {
        AccessStringBuilder { buf: [DISABLED; LENGTH] }
    }

    pub fn enable(mut self, permission: Permission) -> Self {
        self.buf[permission.position()] = permission.letter();
        self
    }

    pub fn disable(mut self, permission: Permission) -> Self {
        self.buf[permission.position()] = DISABLED;
        self
    }

    pub fn build(self) -> AccessString {
        AccessString(self.buf)
    }
}

impl Default for AccessStringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AccessString> for AccessStringBuilder {
    fn from(access: AccessString) -> Self {
        AccessStringBuilder { buf: access.0 }
    }
}

/// Checks one permission of a raw access string.
///
/// `None` is fully permissive. Malformed strings only grant the bits that
/// are actually present at the right position.
pub fn is_enabled(access: Option<&str>, permission: Permission) -> bool {
    match access {
        None => true,
        Some(access) => access.as_bytes().get(permission.position()) == Some(&permission.letter()),
    }
}

/// Validates a raw access string. `None` is valid.
pub fn is_valid(access: Option<&str>) -> bool {
    let Some(access) = access else {
        return true;
    };
    if access.len() != LENGTH || !access.ends_with(RESERVED_SUFFIX) {
        return false;
    }
    Permission::ALL.iter().all(|p| {
        let c = access.as_bytes()[p.position()];
        c == DISABLED || c == p.letter()
    })
}

pub fn can_read(access: Option<&str>) -> bool {
    is_enabled(access, Permission::Read)
}

pub fn can_write(access: Option<&str>) -> bool {
    is_enabled(access, Permission::Write)
}

pub fn can_data_read(access: Option<&str>) -> bool {
    is_enabled(access, Permission::DataRead)
}

pub fn can_data_write(access: Option<&str>) -> bool {
    is_enabled(access, Permission::DataWrite)
}

pub fn can_read_and_write(access: Option<&str>) -> bool {
    can_read(access) && can_write(access)
}

pub fn can_data_read_and_write(access: Option<&str>) -> bool {
    can_data_read(access) && can_data_write(access)
}

pub fn can_read_or_write(access: Option<&str>) -> bool {
    can_read(access) || can_write(access)
}

pub fn can_data_read_or_write(access: Option<&str>) -> bool {
    can_data_read(access) || can_data_write(access)
}

/// True if either data bit is set on a raw access string.
pub fn has_data_sharing(access: &str) -> bool {
    can_data_read(Some(access)) || can_data_write(Some(access))
}

/// Copy of `access` with both data bits cleared.
pub fn disable_data_sharing(access: Option<&str>) -> Option<String> {
    let access = access?;
    let mut bytes = access.as_bytes().to_vec();
    for permission in [Permission::DataRead, Permission::DataWrite] {
        if let Some(c) = bytes.get_mut(permission.position()) {
            *c = DISABLED;
        }
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "access_string_tests.rs"]
mod tests;
