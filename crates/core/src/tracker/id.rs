// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier schemes for metadata references in tracker payloads.
//!
//! A payload may reference a program by uid, code, name or by the value of
//! a metadata attribute. [`TrackerIdSchemeParams`] records which scheme the
//! caller used for each kind of metadata, and [`MetadataIdentifier`] is the
//! resolved key the preheat indexes metadata by.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::tracker::metadata::IdentifiableObject;

static UID_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[A-Za-z][A-Za-z0-9]{10}$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Eleven alphanumeric characters, the first a letter.
pub fn is_valid_uid(uid: &str) -> bool {
    UID_RE.is_match(uid)
}

pub fn validate_uid(uid: &str) -> Result<&str> {
    if is_valid_uid(uid) {
        Ok(uid)
    } else {
        Err(Error::InvalidUid(uid.to_string()))
    }
}

/// Which property of a metadata object a reference is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerIdScheme {
    #[default]
    Uid,
    Code,
    Name,
    Attribute,
}

impl TrackerIdScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerIdScheme::Uid => "UID",
            TrackerIdScheme::Code => "CODE",
            TrackerIdScheme::Name => "NAME",
            TrackerIdScheme::Attribute => "ATTRIBUTE",
        }
    }
}

impl fmt::Display for TrackerIdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrackerIdScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "UID" => Ok(TrackerIdScheme::Uid),
            "CODE" => Ok(TrackerIdScheme::Code),
            "NAME" => Ok(TrackerIdScheme::Name),
            "ATTRIBUTE" => Ok(TrackerIdScheme::Attribute),
            _ => Err(Error::InvalidIdScheme(s.to_string())),
        }
    }
}

/// A scheme plus, for [`TrackerIdScheme::Attribute`], the attribute uid.
///
/// Written as `UID`, `CODE`, `NAME` or `ATTRIBUTE:<uid>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdSchemeParam {
    pub id_scheme: TrackerIdScheme,
    pub attribute_uid: Option<String>,
}

impl IdSchemeParam {
    pub const UID: IdSchemeParam = IdSchemeParam {
        id_scheme: TrackerIdScheme::Uid,
        attribute_uid: None,
    };

    pub const CODE: IdSchemeParam = IdSchemeParam {
        id_scheme: TrackerIdScheme::Code,
        attribute_uid: None,
    };

    pub const NAME: IdSchemeParam = IdSchemeParam {
        id_scheme: TrackerIdScheme::Name,
        attribute_uid: None,
    };

    pub fn of_attribute(attribute_uid: impl Into<String>) -> Self {
        IdSchemeParam {
            id_scheme: TrackerIdScheme::Attribute,
            attribute_uid: Some(attribute_uid.into()),
        }
    }

    /// Interprets a raw payload reference under this scheme.
    pub fn to_metadata_identifier(&self, raw: &str) -> MetadataIdentifier {
        match self.id_scheme {
            TrackerIdScheme::Uid => MetadataIdentifier::of_uid(raw),
            TrackerIdScheme::Code => MetadataIdentifier::of_code(raw),
            TrackerIdScheme::Name => MetadataIdentifier::of_name(raw),
            TrackerIdScheme::Attribute => {
                MetadataIdentifier::of_attribute(self.attribute_uid.clone().unwrap_or_default(), raw)
            }
        }
    }

    /// The value `object` is known by under this scheme, if it has one.
    pub fn identifier_of<T: IdentifiableObject + ?Sized>(&self, object: &T) -> Option<String> {
        let value = match self.id_scheme {
            TrackerIdScheme::Uid => Some(object.uid()),
            TrackerIdScheme::Code => object.code(),
            TrackerIdScheme::Name => Some(object.name()),
            TrackerIdScheme::Attribute => self
                .attribute_uid
                .as_deref()
                .and_then(|attribute| object.attribute_value(attribute)),
        };
        value.filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// The key `object` is indexed under for this scheme.
    pub fn identify<T: IdentifiableObject + ?Sized>(&self, object: &T) -> Option<MetadataIdentifier> {
        self.identifier_of(object)
            .map(|value| self.to_metadata_identifier(&value))
    }
}

impl fmt::Display for IdSchemeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id_scheme, &self.attribute_uid) {
            (TrackerIdScheme::Attribute, Some(uid)) => write!(f, "ATTRIBUTE:{uid}"),
            (scheme, _) => write!(f, "{scheme}"),
        }
    }
}

impl FromStr for IdSchemeParam {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((scheme, uid)) = s.split_once(':') {
            if scheme.eq_ignore_ascii_case("ATTRIBUTE") && is_valid_uid(uid) {
                return Ok(IdSchemeParam::of_attribute(uid));
            }
            return Err(Error::InvalidIdScheme(s.to_string()));
        }
        match s.parse::<TrackerIdScheme>()? {
            TrackerIdScheme::Attribute => Err(Error::InvalidIdScheme(s.to_string())),
            id_scheme => Ok(IdSchemeParam {
                id_scheme,
                attribute_uid: None,
            }),
        }
    }
}

impl TryFrom<String> for IdSchemeParam {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<IdSchemeParam> for String {
    fn from(param: IdSchemeParam) -> String {
        param.to_string()
    }
}

/// Id schemes per metadata kind, each falling back to `id_scheme`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerIdSchemeParams {
    pub id_scheme: IdSchemeParam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id_scheme: Option<IdSchemeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_stage_id_scheme: Option<IdSchemeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_id_scheme: Option<IdSchemeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_element_id_scheme: Option<IdSchemeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_option_combo_id_scheme: Option<IdSchemeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_option_id_scheme: Option<IdSchemeParam>,
}

impl TrackerIdSchemeParams {
    /// Every kind uses `id_scheme`.
    pub fn uniform(id_scheme: IdSchemeParam) -> Self {
        TrackerIdSchemeParams {
            id_scheme,
            ..Default::default()
        }
    }

    pub fn program(&self) -> &IdSchemeParam {
        self.program_id_scheme.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn program_stage(&self) -> &IdSchemeParam {
        self.program_stage_id_scheme.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn org_unit(&self) -> &IdSchemeParam {
        self.org_unit_id_scheme.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn data_element(&self) -> &IdSchemeParam {
        self.data_element_id_scheme.as_ref().unwrap_or(&self.id_scheme)
    }

    pub fn category_option_combo(&self) -> &IdSchemeParam {
        self.category_option_combo_id_scheme
            .as_ref()
            .unwrap_or(&self.id_scheme)
    }

    pub fn category_option(&self) -> &IdSchemeParam {
        self.category_option_id_scheme
            .as_ref()
            .unwrap_or(&self.id_scheme)
    }

    /// Relationship types have no dedicated scheme.
    pub fn relationship_type(&self) -> &IdSchemeParam {
        &self.id_scheme
    }
}

/// A metadata reference interpreted under a scheme.
///
/// For [`TrackerIdScheme::Attribute`], `identifier` holds the attribute uid
/// and `attribute_value` the value matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataIdentifier {
    pub id_scheme: TrackerIdScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<String>,
}

impl MetadataIdentifier {
    pub fn of_uid(uid: impl Into<String>) -> Self {
        Self::of(TrackerIdScheme::Uid, uid)
    }

    pub fn of_code(code: impl Into<String>) -> Self {
        Self::of(TrackerIdScheme::Code, code)
    }

    pub fn of_name(name: impl Into<String>) -> Self {
        Self::of(TrackerIdScheme::Name, name)
    }

    pub fn of_attribute(attribute_uid: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataIdentifier {
            id_scheme: TrackerIdScheme::Attribute,
            identifier: Some(attribute_uid.into()),
            attribute_value: Some(value.into()),
        }
    }

    fn of(id_scheme: TrackerIdScheme, identifier: impl Into<String>) -> Self {
        MetadataIdentifier {
            id_scheme,
            identifier: Some(identifier.into()),
            attribute_value: None,
        }
    }

    /// The value a payload carries for this reference.
    pub fn identifier_or_attribute_value(&self) -> Option<&str> {
        match self.id_scheme {
            TrackerIdScheme::Attribute => self.attribute_value.as_deref(),
            _ => self.identifier.as_deref(),
        }
    }

    /// No usable value to match against.
    pub fn is_blank(&self) -> bool {
        self.identifier_or_attribute_value()
            .map_or(true, str::is_empty)
    }
}

impl fmt::Display for MetadataIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id_scheme {
            TrackerIdScheme::Attribute => write!(
                f,
                "ATTRIBUTE:{}={}",
                self.identifier.as_deref().unwrap_or_default(),
                self.attribute_value.as_deref().unwrap_or_default()
            ),
            scheme => write!(f, "{scheme}:{}", self.identifier.as_deref().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
