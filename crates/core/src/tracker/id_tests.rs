// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::tracker::metadata::Program;
use yare::parameterized;

fn program() -> Program {
    let mut program = Program {
        uid: "Program0001".into(),
        code: Some("MNCH".into()),
        name: "Child Programme".into(),
        ..Default::default()
    };
    program
        .attribute_values
        .insert("LegacyId001".into(), "legacy-7".into());
    program
}

#[parameterized(
    valid = { "IpHINAT79UW", true },
    digits_after_letter = { "a1234567890", true },
    too_short = { "IpHINAT79U", false },
    too_long = { "IpHINAT79UWx", false },
    leading_digit = { "1pHINAT79UW", false },
    punctuation = { "IpHINAT-9UW", false },
    empty = { "", false },
)]
fn uid_validation(uid: &str, expected: bool) {
    assert_eq!(is_valid_uid(uid), expected);
    assert_eq!(validate_uid(uid).is_ok(), expected);
}

#[parameterized(
    uid = { "UID", IdSchemeParam::UID },
    code = { "code", IdSchemeParam::CODE },
    name = { "Name", IdSchemeParam::NAME },
    attribute = { "ATTRIBUTE:LegacyId001", IdSchemeParam::of_attribute("LegacyId001") },
)]
fn id_scheme_param_from_str(input: &str, expected: IdSchemeParam) {
    assert_eq!(input.parse::<IdSchemeParam>().unwrap(), expected);
}

#[parameterized(
    unknown = { "EMAIL" },
    attribute_without_uid = { "ATTRIBUTE" },
    attribute_bad_uid = { "ATTRIBUTE:short" },
    other_with_colon = { "CODE:LegacyId001" },
)]
fn id_scheme_param_rejects(input: &str) {
    assert!(matches!(input.parse::<IdSchemeParam>(), Err(Error::InvalidIdScheme(_))));
}

#[test]
fn id_scheme_param_serializes_as_string() {
    let param = IdSchemeParam::of_attribute("LegacyId001");
    assert_eq!(serde_json::to_string(&param).unwrap(), "\"ATTRIBUTE:LegacyId001\"");
    assert_eq!(serde_json::from_str::<IdSchemeParam>("\"CODE\"").unwrap(), IdSchemeParam::CODE);
}

#[parameterized(
    uid = { IdSchemeParam::UID, Some("Program0001") },
    code = { IdSchemeParam::CODE, Some("MNCH") },
    name = { IdSchemeParam::NAME, Some("Child Programme") },
    attribute = { IdSchemeParam::of_attribute("LegacyId001"), Some("legacy-7") },
    missing_attribute = { IdSchemeParam::of_attribute("Missing0001"), None },
)]
fn identifier_of_program(param: IdSchemeParam, expected: Option<&str>) {
    assert_eq!(param.identifier_of(&program()).as_deref(), expected);
}

#[test]
fn identify_matches_payload_interpretation() {
    let param = IdSchemeParam::of_attribute("LegacyId001");
    let indexed = param.identify(&program()).unwrap();
    assert_eq!(indexed, param.to_metadata_identifier("legacy-7"));
    assert_eq!(indexed.identifier.as_deref(), Some("LegacyId001"));
    assert_eq!(indexed.identifier_or_attribute_value(), Some("legacy-7"));
}

#[test]
fn program_without_code_has_no_code_identifier() {
    let mut program = program();
    program.code = None;
    assert_eq!(IdSchemeParam::CODE.identify(&program), None);
}

#[test]
fn per_kind_schemes_fall_back_to_default() {
    let params = TrackerIdSchemeParams {
        program_id_scheme: Some(IdSchemeParam::CODE),
        ..TrackerIdSchemeParams::uniform(IdSchemeParam::NAME)
    };

    assert_eq!(params.program(), &IdSchemeParam::CODE);
    assert_eq!(params.org_unit(), &IdSchemeParam::NAME);
    assert_eq!(params.data_element(), &IdSchemeParam::NAME);
    assert_eq!(params.category_option_combo(), &IdSchemeParam::NAME);
}

#[test]
fn id_scheme_params_deserialize_camel_case() {
    let json = r#"{ "idScheme": "CODE", "orgUnitIdScheme": "ATTRIBUTE:LegacyId001" }"#;
    let params: TrackerIdSchemeParams = serde_json::from_str(json).unwrap();

    assert_eq!(params.program(), &IdSchemeParam::CODE);
    assert_eq!(params.org_unit(), &IdSchemeParam::of_attribute("LegacyId001"));
}

#[test]
fn metadata_identifier_blank() {
    assert!(MetadataIdentifier::of_uid("").is_blank());
    assert!(MetadataIdentifier::default().is_blank());
    assert!(!MetadataIdentifier::of_code("MNCH").is_blank());
}

#[test]
fn metadata_identifier_display() {
    assert_eq!(MetadataIdentifier::of_code("MNCH").to_string(), "CODE:MNCH");
    assert_eq!(
        MetadataIdentifier::of_attribute("LegacyId001", "legacy-7").to_string(),
        "ATTRIBUTE:LegacyId001=legacy-7"
    );
}
