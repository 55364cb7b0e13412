// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON fixture loading.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use sanitas_core::{Schema, SchemaRegistry, User};

use crate::error::{Error, Result};

/// Reads and decodes one JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FixtureNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    serde_json::from_str(&content).map_err(|source| Error::InvalidFixture {
        path: path.to_path_buf(),
        source,
    })
}

/// Schema registry from a JSON array of schemas.
pub fn schemas(path: &Path) -> Result<SchemaRegistry> {
    let schemas: Vec<Schema> = read_json(path)?;
    tracing::debug!(count = schemas.len(), "loaded schemas");
    Ok(SchemaRegistry::from_schemas(schemas))
}

/// The acting user, if a fixture was given.
pub fn user(path: Option<&Path>) -> Result<Option<User>> {
    path.map(read_json).transpose()
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
