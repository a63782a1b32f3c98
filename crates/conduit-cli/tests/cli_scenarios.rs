// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn scenarios_table_reports_all_six() {
    Command::cargo_bin("conduit-cli")
        .unwrap()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("S1").and(predicate::str::contains("S6")));
}

#[test]
fn scenarios_json_is_parseable() {
    let out = Command::cargo_bin("conduit-cli")
        .unwrap()
        .args(["scenarios", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list[3]["name"], "S4");
    assert_eq!(list[3]["state"]["toggled"], false);
}

#[test]
fn config_file_overrides_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("switch.json");
    std::fs::write(&path, br#"{"capacity": 700}"#).unwrap();
    Command::cargo_bin("conduit-cli")
        .unwrap()
        .args(["scenarios", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn unreadable_config_fails() {
    Command::cargo_bin("conduit-cli")
        .unwrap()
        .args(["scenarios", "--config", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}

#[test]
fn actions_lists_switch_set() {
    Command::cargo_bin("conduit-cli")
        .unwrap()
        .arg("actions")
        .assert()
        .success()
        .stdout("switch_on\ntoggle_on\ntoggle_off\n");
}
