//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

/// `planit` isolated to `home`, with ambient overrides cleared.
pub fn planit(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("planit");
    cmd.env("PLANIT_HOME", home)
        .env_remove("PLANIT_API_URL")
        .env_remove("PLANIT_POSTURE")
        .env_remove("PLANIT_PASSWORD")
        .env_remove("PLANIT_LOG");
    cmd
}

/// Reads a JSON store file, or `null` when it does not exist.
pub fn read_store(path: &Path) -> Value {
    if !path.exists() {
        return Value::Null;
    }
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

pub fn secure_store(home: &Path) -> Value {
    read_store(&home.join("secure_store.json"))
}

pub fn local_store(home: &Path) -> Value {
    read_store(&home.join("local_storage.json"))
}

/// Writes a store file the way a previous login would have.
pub fn seed_store(path: &Path, entries: &Value) {
    fs::write(path, serde_json::to_string_pretty(entries).unwrap()).unwrap();
}
