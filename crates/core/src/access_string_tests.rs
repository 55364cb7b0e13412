// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn builder_starts_disabled() {
    assert_eq!(AccessString::builder().build().as_str(), DEFAULT);
}

#[test]
fn builder_every_subset_round_trips() {
    for mask in 0u8..16 {
        let mut builder = AccessString::builder();
        for (i, permission) in Permission::ALL.iter().enumerate() {
            if mask & (1 << i) != 0 {
                builder = builder.enable(*permission);
            }
        }
        let access = builder.build();

        assert!(is_valid(Some(access.as_str())), "{access} should be valid");
        for (i, permission) in Permission::ALL.iter().enumerate() {
            let expected = mask & (1 << i) != 0;
            assert_eq!(access.is_enabled(*permission), expected, "{access} {permission}");
            assert_eq!(is_enabled(Some(access.as_str()), *permission), expected);
        }
    }
}

#[test]
fn builder_disable_clears_bit() {
    let access = AccessString::builder()
        .enable(Permission::Read)
        .enable(Permission::Write)
        .disable(Permission::Write)
        .build();
    assert_eq!(access.as_str(), READ);
}

#[parameterized(
    read = { Permission::Read, READ },
    write = { Permission::Write, WRITE },
    data_read = { Permission::DataRead, DATA_READ },
    data_write = { Permission::DataWrite, DATA_WRITE },
)]
fn single_permission_constants(permission: Permission, expected: &str) {
    assert_eq!(AccessString::builder().enable(permission).build().as_str(), expected);
}

#[test]
fn combined_constants() {
    let full = AccessString::builder()
        .enable(Permission::Read)
        .enable(Permission::Write)
        .enable(Permission::DataRead)
        .enable(Permission::DataWrite)
        .build();
    assert_eq!(full.as_str(), FULL);
    assert_eq!(CATEGORY_OPTION_DEFAULT, FULL);
    assert_eq!(full.without_data_sharing().as_str(), CATEGORY_NO_DATA_SHARING_DEFAULT);
    assert_eq!(full.without_data_sharing().as_str(), READ_WRITE);
}

#[parameterized(
    read = { Permission::Read },
    write = { Permission::Write },
    data_read = { Permission::DataRead },
    data_write = { Permission::DataWrite },
)]
fn missing_access_string_is_permissive(permission: Permission) {
    assert!(is_enabled(None, permission));
}

#[test]
fn missing_access_string_is_valid() {
    assert!(is_valid(None));
    assert!(can_read_and_write(None));
    assert!(can_data_read_and_write(None));
}

#[parameterized(
    default = { "--------" },
    full = { "rwrw----" },
    read_only = { "r-------" },
    data_write_only = { "---w----" },
)]
fn valid_access_strings(input: &str) {
    assert!(is_valid(Some(input)));
    assert_eq!(input.parse::<AccessString>().unwrap().as_str(), input);
}

#[parameterized(
    empty = { "" },
    too_short = { "rw----" },
    too_long = { "rwrw-----" },
    reserved_bit_set = { "rwrw-r--" },
    write_in_read_slot = { "wr------" },
    read_in_data_write_slot = { "rwrr----" },
    uppercase = { "RW------" },
    unknown_letter = { "x-------" },
)]
fn invalid_access_strings(input: &str) {
    assert!(!is_valid(Some(input)));
    assert!(input.parse::<AccessString>().is_err());
}

#[test]
fn predicates_on_category_option_default() {
    let access = Some(CATEGORY_OPTION_DEFAULT);
    assert!(can_read(access));
    assert!(can_write(access));
    assert!(can_data_read(access));
    assert!(can_data_write(access));
    assert!(can_read_or_write(access));
    assert!(can_data_read_or_write(access));
}

#[test]
fn predicates_on_no_data_sharing_default() {
    let access = Some(CATEGORY_NO_DATA_SHARING_DEFAULT);
    assert!(can_read_and_write(access));
    assert!(!can_data_read(access));
    assert!(!can_data_write(access));
    assert!(!can_data_read_or_write(access));
}

#[parameterized(
    none = { DEFAULT, false },
    metadata_only = { READ_WRITE, false },
    data_read = { DATA_READ, true },
    data_write = { DATA_WRITE, true },
    full = { FULL, true },
)]
fn has_data_sharing_cases(input: &str, expected: bool) {
    assert_eq!(has_data_sharing(input), expected);
}

#[test]
fn disable_data_sharing_clears_data_bits() {
    assert_eq!(disable_data_sharing(Some(FULL)).as_deref(), Some(READ_WRITE));
    assert_eq!(disable_data_sharing(Some(DATA_READ_WRITE)).as_deref(), Some(DEFAULT));
    assert_eq!(disable_data_sharing(None), None);
}

#[test]
fn serde_as_plain_string() {
    let access: AccessString = serde_json::from_str("\"rw------\"").unwrap();
    assert_eq!(access.as_str(), READ_WRITE);
    assert_eq!(serde_json::to_string(&access).unwrap(), "\"rw------\"");
    assert!(serde_json::from_str::<AccessString>("\"rw\"").is_err());
}

#[test]
fn permissions_iterates_enabled_bits() {
    let access: AccessString = "r--w----".parse().unwrap();
    let enabled: Vec<_> = access.permissions().collect();
    assert_eq!(enabled, vec![Permission::Read, Permission::DataWrite]);
}
