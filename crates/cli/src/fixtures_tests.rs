// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use sanitas_core::SchemaService;
use tempfile::TempDir;

#[test]
fn test_read_json_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("user.json");
    let err = read_json::<User>(&path).unwrap_err();
    assert!(matches!(err, Error::FixtureNotFound(p) if p == path));
}

#[test]
fn test_read_json_invalid_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("user.json");
    fs::write(&path, "{\"uid\": 3}").unwrap();
    let err = read_json::<User>(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFixture { .. }));
}

#[test]
fn test_user_is_optional() {
    assert_eq!(user(None).unwrap(), None);

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("user.json");
    fs::write(&path, r#"{"uid": "UserUid0001", "username": "clerk"}"#).unwrap();
    let loaded = user(Some(&path)).unwrap().unwrap();
    assert_eq!(loaded.username, "clerk");
}

#[test]
fn test_schemas_are_registered_by_name() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("schemas.json");
    fs::write(
        &path,
        r#"[{"name": "program", "shareable": true}, {"name": "dataElement"}]"#,
    )
    .unwrap();

    let registry = schemas(&path).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.schema("program").is_some_and(|s| s.shareable));
}
