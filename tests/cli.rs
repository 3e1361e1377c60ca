//! Integration tests for the txcheck CLI.

#![allow(deprecated)] // cargo_bin deprecation doesn't affect standard builds

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const REQUEST: &str = "tests/fixtures/request_babbage.json";
const VIEW: &str = "tests/fixtures/view_babbage.yaml";
const VIEW_FEE_MISMATCH: &str = "tests/fixtures/view_fee_mismatch.yaml";
const KES_VALID: &str = "tests/fixtures/kes_valid.json";
const KES_EXPIRED: &str = "tests/fixtures/kes_expired.json";
const KES_VALID_TEXT: &str = "tests/fixtures/kes_valid.txt";

fn txcheck() -> Command {
    let mut cmd = Command::cargo_bin("txcheck").unwrap();
    cmd.env_remove("TX_ERA").arg("--no-color");
    cmd
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_show_help() {
    Command::cargo_bin("txcheck")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cross-check Cardano"))
        .stdout(predicate::str::contains("EXIT CODES"));
}

#[test]
fn test_show_version() {
    Command::cargo_bin("txcheck")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("txcheck"));
}

// ============================================================================
// View checks
// ============================================================================

#[test]
fn test_view_matches_request() {
    txcheck()
        .args(["view", "--request", REQUEST, VIEW])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction View"))
        .stdout(predicate::str::contains("Era: Babbage"))
        .stdout(predicate::str::contains("182,485 lovelace"))
        .stdout(predicate::str::contains("Inputs: 3"))
        .stdout(predicate::str::contains("reference inputs"))
        .stdout(predicate::str::contains("12 passed, 0 skipped"));
}

#[test]
fn test_view_from_stdin() {
    let view = fs::read_to_string(VIEW).unwrap();
    txcheck()
        .args(["view", "--request", REQUEST])
        .write_stdin(view)
        .assert()
        .success()
        .stdout(predicate::str::contains("12 passed"));
}

#[test]
fn test_view_json_output() {
    let output = txcheck()
        .args(["view", "-r", REQUEST, VIEW, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["view"]["era"], "Babbage");
    assert_eq!(parsed["view"]["validity range"]["upper bound"], 91234567);
    assert_eq!(parsed["checks"].as_array().unwrap().len(), 12);
    assert_eq!(parsed["checks"][0]["property"], "inputs");
}

#[test]
fn test_view_fee_mismatch() {
    txcheck()
        .args(["view", "--request", REQUEST, VIEW_FEE_MISMATCH])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fee: 182485 != 200000"));
}

#[test]
fn test_view_missing_input() {
    let view = fs::read_to_string(VIEW).unwrap();
    let mismatched = temp_file(&view.replacen("#0\n", "#9\n", 1));
    txcheck()
        .args(["view", "--request", REQUEST])
        .arg(mismatched.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("txins"));
}

#[test]
fn test_view_default_era_from_env() {
    let request = fs::read_to_string(REQUEST).unwrap();
    let without_era = temp_file(&request.replace(",\n  \"era\": \"babbage\"", ""));

    Command::cargo_bin("txcheck")
        .unwrap()
        .env("TX_ERA", "alonzo")
        .args(["--no-color", "view", "--request"])
        .arg(without_era.path())
        .arg(VIEW)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("transaction era"));

    txcheck()
        .args(["view", "--request"])
        .arg(without_era.path())
        .arg(VIEW)
        .assert()
        .success();
}

#[test]
fn test_malformed_view() {
    let malformed = temp_file("inputs: [\n");
    txcheck()
        .args(["view", "--request", REQUEST])
        .arg(malformed.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_malformed_request() {
    let malformed = temp_file("{\"txins\": 42}");
    txcheck()
        .args(["view", "--request"])
        .arg(malformed.path())
        .arg(VIEW)
        .assert()
        .code(4);
}

#[test]
fn test_missing_view_file() {
    txcheck()
        .args(["view", "--request", REQUEST, "/nonexistent/view.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_empty_stdin() {
    txcheck()
        .args(["view", "--request", REQUEST])
        .write_stdin("  \n")
        .assert()
        .code(3);
}

#[test]
fn test_unknown_default_era_rejected() {
    txcheck()
        .args(["view", "--request", REQUEST, VIEW, "--default-era", "goguen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("goguen"));
}

#[test]
fn test_verbose_logs_checks() {
    txcheck()
        .args(["-vv", "view", "--request", REQUEST, VIEW])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("check passed"));
}

// ============================================================================
// KES period info
// ============================================================================

#[test]
fn test_kes_classify() {
    txcheck()
        .args(["kes", KES_VALID])
        .assert()
        .success()
        .stdout(predicate::str::contains("KES Period Info"))
        .stdout(predicate::str::contains("[400, 466)"))
        .stdout(predicate::str::contains("Scenario: all_valid"));
}

#[test]
fn test_kes_json() {
    let output = txcheck()
        .args(["kes", KES_EXPIRED, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["scenario"], "invalid_kes_period");
    assert_eq!(parsed["kes_period_valid"], false);
    assert_eq!(parsed["counter_valid"], true);
}

#[test]
fn test_kes_expected_scenario() {
    txcheck()
        .args(["kes", KES_EXPIRED, "--expect", "invalid-kes-period"])
        .assert()
        .success();

    txcheck()
        .args(["kes", KES_EXPIRED, "--expect", "all_valid"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid_kes_period"));
}

#[test]
fn test_kes_output_text_cross_check() {
    txcheck()
        .args(["kes", KES_VALID, "--expect", "all_valid", "--output-text", KES_VALID_TEXT])
        .assert()
        .success();

    // the verdict lines claim a valid period, the metrics say otherwise
    txcheck()
        .args([
            "kes",
            KES_EXPIRED,
            "--expect",
            "invalid_kes_period",
            "--output-text",
            KES_VALID_TEXT,
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("KES period"));
}

#[test]
fn test_kes_malformed_metrics() {
    let malformed = temp_file("{\"qKesCurrentKesPeriod\": 1}");
    txcheck()
        .arg("kes")
        .arg(malformed.path())
        .assert()
        .code(2);
}
