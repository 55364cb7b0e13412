// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::tracker::metadata::Program;
use std::collections::BTreeMap;
use yare::parameterized;

fn program() -> Program {
    Program {
        uid: "Program0001".into(),
        code: Some("MNCH".into()),
        name: "Child Programme".into(),
        attribute_values: BTreeMap::from([("AttrUid0001".to_string(), "child".to_string())]),
        ..Default::default()
    }
}

#[parameterized(
    uid = { IdSchemeParam::UID, "Program0001" },
    code = { IdSchemeParam::CODE, "MNCH" },
    name = { IdSchemeParam::NAME, "Child Programme" },
    attribute = { IdSchemeParam::of_attribute("AttrUid0001"), "child" },
)]
fn render_uses_configured_scheme(param: IdSchemeParam, expected: &str) {
    let program = program();
    assert_eq!(render(Some(&program), &param, "Program0001"), expected);
}

#[test]
fn render_falls_back_to_uid() {
    let program = Program {
        code: None,
        ..program()
    };
    assert_eq!(render(Some(&program), &IdSchemeParam::CODE, "Program0001"), "Program0001");
    assert_eq!(render::<Program>(None, &IdSchemeParam::CODE, "Program0001"), "Program0001");
}

#[test]
fn unresolved_names_kind_and_identifier() {
    let err = unresolved("program", "MNCH");
    assert!(matches!(
        &err,
        Error::UnresolvedReference { kind: "program", identifier } if identifier == "MNCH"
    ));
    assert!(err.to_string().contains("MNCH"));
}
