//! # Cookbook Binary Integration Tests
//!
//! File: moult/tests/cookbook.rs
//!
//! ## Overview
//!
//! Runs the `cookbook` demo binary end to end: help output, layered
//! configuration, the confirmation and prompt flows, deprecation notices and
//! positional arguments.
//!
mod common;

use common::Kitchen;
use predicates::prelude::*;

// --- Help & Version ---

#[test]
fn test_help_lists_visible_commands() {
    Kitchen::new()
        .cookbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cook"))
        .stdout(predicate::str::contains("plate"))
        .stdout(predicate::str::contains("Serve dinner (Beta)"))
        .stdout(predicate::str::contains("bake").not());
}

#[test]
fn test_root_without_subcommand_prints_help() {
    Kitchen::new()
        .cookbook()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_command() {
    Kitchen::new()
        .cookbook()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    Kitchen::new()
        .cookbook()
        .args(["cook", "--no-such-flag"])
        .assert()
        .code(2);
}

// --- Layered Configuration ---

#[test]
fn test_cook_uses_defaults() {
    Kitchen::new()
        .cookbook()
        .arg("cook")
        .assert()
        .success()
        .stdout("anonymous cooks at heat level 5 for 10m0s with spices []\n");
}

#[test]
fn test_config_file_overrides_defaults() {
    Kitchen::with_config("heat-level: 11\nchef: Remy\n")
        .cookbook()
        .arg("cook")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remy cooks at heat level 11"));
}

#[test]
fn test_environment_overrides_config_file() {
    Kitchen::with_config("heat-level: 11\n")
        .cookbook()
        .arg("cook")
        .env("COOKBOOK_HEAT_LEVEL", "33")
        .assert()
        .success()
        .stdout(predicate::str::contains("heat level 33"));
}

#[test]
fn test_flag_overrides_everything() {
    Kitchen::with_config("heat-level: 11\n")
        .cookbook()
        .args(["cook", "--heat-level=22"])
        .env("COOKBOOK_HEAT_LEVEL", "33")
        .assert()
        .success()
        .stdout(predicate::str::contains("heat level 22"));
}

#[test]
fn test_empty_environment_variable_is_ignored() {
    Kitchen::with_config("heat-level: 11\n")
        .cookbook()
        .arg("cook")
        .env("COOKBOOK_HEAT_LEVEL", "")
        .assert()
        .success()
        .stdout(predicate::str::contains("heat level 11"));
}

#[test]
fn test_embedded_flags_and_lists() {
    Kitchen::new()
        .cookbook()
        .args(["cook", "-l", "7", "-c", "Colette", "--dry-run", "--spice", "salt,pepper", "--timer", "90s"])
        .assert()
        .success()
        .stdout("Colette would cook at heat level 7 for 1m30s with spices [salt, pepper]\n");
}

#[test]
fn test_toml_config_file() {
    let kitchen = Kitchen::new();
    let path = kitchen.home.path().join("cookbook.toml");
    std::fs::write(&path, "heat-level = 8\ntimer = \"15m\"\n").unwrap();
    kitchen
        .cookbook()
        .arg("cook")
        .env("COOKBOOK_CONFIG_PATH", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("heat level 8 for 15m0s"));
}

#[test]
fn test_malformed_config_file_is_fatal() {
    Kitchen::with_config("heat-level: [unclosed\n")
        .cookbook()
        .arg("cook")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error parsing config"));
}

#[test]
fn test_undecodable_value_is_reported() {
    Kitchen::new()
        .cookbook()
        .arg("cook")
        .env("COOKBOOK_HEAT_LEVEL", "scorching")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("heat-level"));
}

// --- Confirmation ---

#[test]
fn test_clean_requires_typed_confirmation() {
    Kitchen::new()
        .cookbook()
        .arg("clean")
        .write_stdin("pantry\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "To proceed, type \"pantry\" or re-run this command with --force",
        ))
        .stdout(predicate::str::contains("The pantry is empty."));
}

#[test]
fn test_clean_aborts_on_mismatch() {
    Kitchen::new()
        .cookbook()
        .arg("clean")
        .write_stdin("fridge\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("The pantry is empty.").not())
        .stderr(predicate::str::contains("action aborted"));
}

#[test]
fn test_clean_force_skips_confirmation() {
    Kitchen::new()
        .cookbook()
        .args(["clean", "--force"])
        .assert()
        .success()
        .stdout("The pantry is empty.\n");
}

// --- Prompt ---

#[test]
fn test_serve_accepted() {
    Kitchen::new()
        .cookbook()
        .arg("serve")
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Serve dinner for 4 guests? [y/N]"))
        .stdout(predicate::str::contains("Dinner is served for 4."));
}

#[test]
fn test_serve_declined_exits_quietly() {
    Kitchen::new()
        .cookbook()
        .args(["serve", "-g", "6"])
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Dinner is not served.\n"))
        .stderr(predicate::str::contains("Error").not());
}

#[test]
fn test_serve_single_guest_skips_prompt() {
    Kitchen::new()
        .cookbook()
        .args(["serve", "--guests", "1"])
        .assert()
        .success()
        .stdout("Dinner is served for 1.\n");
}

#[test]
fn test_serve_yolo_skips_prompt() {
    Kitchen::new()
        .cookbook()
        .args(["serve", "--yolo"])
        .assert()
        .success()
        .stdout("Dinner is served for 4.\n");
}

// --- Deprecation ---

#[test]
fn test_bake_prints_deprecation_notice() {
    Kitchen::new()
        .cookbook()
        .arg("bake")
        .assert()
        .success()
        .stdout("Command \"cookbook bake\" is deprecated, use \"cook\" instead\nBaked.\n");
}

#[test]
fn test_bake_notice_is_suppressed_with_json() {
    Kitchen::new()
        .cookbook()
        .args(["--json", "bake"])
        .assert()
        .success()
        .stdout("Baked.\n");
}

// --- Positional Arguments ---

#[test]
fn test_plate_by_alias() {
    Kitchen::new()
        .cookbook()
        .args(["p", "soup", "salad"])
        .assert()
        .success()
        .stdout("Plated: soup, salad\n");
}

#[test]
fn test_plate_without_dishes_fails() {
    Kitchen::new()
        .cookbook()
        .arg("plate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one dish is required"));
}
