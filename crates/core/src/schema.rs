// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-type metadata consumed by the sharing engine.
//!
//! A [`Schema`] tells the engine which authorities guard each capability on a
//! type and whether instances carry sharing at all. Schemas are looked up by
//! the type's singular name (`dataSet`, `categoryOption`, ...). The registry
//! is built once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Capability an authority list guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorityType {
    Read,
    Create,
    CreatePublic,
    CreatePrivate,
    Externalize,
    Update,
    Delete,
    DataRead,
    DataCreate,
}

impl AuthorityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityType::Read => "READ",
            AuthorityType::Create => "CREATE",
            AuthorityType::CreatePublic => "CREATE_PUBLIC",
            AuthorityType::CreatePrivate => "CREATE_PRIVATE",
            AuthorityType::Externalize => "EXTERNALIZE",
            AuthorityType::Update => "UPDATE",
            AuthorityType::Delete => "DELETE",
            AuthorityType::DataRead => "DATA_READ",
            AuthorityType::DataCreate => "DATA_CREATE",
        }
    }
}

impl fmt::Display for AuthorityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthorityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "READ" => Ok(AuthorityType::Read),
            "CREATE" => Ok(AuthorityType::Create),
            "CREATE_PUBLIC" => Ok(AuthorityType::CreatePublic),
            "CREATE_PRIVATE" => Ok(AuthorityType::CreatePrivate),
            "EXTERNALIZE" => Ok(AuthorityType::Externalize),
            "UPDATE" => Ok(AuthorityType::Update),
            "DELETE" => Ok(AuthorityType::Delete),
            "DATA_READ" => Ok(AuthorityType::DataRead),
            "DATA_CREATE" => Ok(AuthorityType::DataCreate),
            _ => Err(Error::InvalidAuthorityType(s.to_string())),
        }
    }
}

/// Sharing and authority description of one metadata type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Singular type name, also the key objects report via `object_type()`.
    pub name: String,
    /// Instances carry public access, owner and grants.
    #[serde(default)]
    pub shareable: bool,
    /// Instances carry the data read/write bits.
    #[serde(default)]
    pub data_shareable: bool,
    /// New instances start private instead of public read/write.
    #[serde(default)]
    pub default_private: bool,
    /// Owners and write grantees may edit without a create authority.
    #[serde(default)]
    pub implicit_private_authority: bool,
    /// Any-of authority lists per capability.
    #[serde(default)]
    pub authorities: BTreeMap<AuthorityType, Vec<String>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn shareable(mut self, shareable: bool) -> Self {
        self.shareable = shareable;
        self
    }

    pub fn data_shareable(mut self, data_shareable: bool) -> Self {
        self.data_shareable = data_shareable;
        self
    }

    pub fn default_private(mut self, default_private: bool) -> Self {
        self.default_private = default_private;
        self
    }

    pub fn implicit_private_authority(mut self, implicit: bool) -> Self {
        self.implicit_private_authority = implicit;
        self
    }

    pub fn with_authority<I, A>(mut self, authority_type: AuthorityType, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.authorities
            .entry(authority_type)
            .or_default()
            .extend(authorities.into_iter().map(Into::into));
        self
    }

    /// Authorities declared for `authority_type`, empty when none are.
    pub fn authority_by_type(&self, authority_type: AuthorityType) -> &[String] {
        self.authorities
            .get(&authority_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any list is declared for `authority_type`.
    pub fn declares(&self, authority_type: AuthorityType) -> bool {
        self.authorities.contains_key(&authority_type)
    }
}

/// Lookup of schemas by type name.
pub trait SchemaService {
    /// Returns the schema registered for `object_type`, `None` when the type
    /// is unknown to the system.
    fn schema(&self, object_type: &str) -> Option<&Schema>;
}

impl<S: SchemaService + ?Sized> SchemaService for &S {
    fn schema(&self, object_type: &str) -> Option<&Schema> {
        (**self).schema(object_type)
    }
}

/// In-memory [`SchemaService`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema);
        }
        registry
    }

    /// Registers a schema, replacing any previous one of the same name.
    pub fn register(&mut self, schema: Schema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaService for SchemaRegistry {
    fn schema(&self, object_type: &str) -> Option<&Schema> {
        self.schemas.get(object_type)
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
