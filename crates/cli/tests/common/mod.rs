// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Path to a JSON file under `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// A `sanitas` command isolated from any config on the host: it runs in
/// `temp` and looks for the user config directory there too.
pub fn sanitas(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("sanitas");
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

/// Runs the command, asserts success and parses stdout as JSON.
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
