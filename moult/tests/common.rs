//! # Cookbook Integration Test Common Helpers
//!
//! File: moult/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests that drive the compiled
//! `cookbook` binary. Every command runs with `HOME` pointing into a scratch
//! directory and `COOKBOOK_CONFIG_PATH` set explicitly, so that the machine's
//! own `~/.cookbook.yaml` and `COOKBOOK_*` variables never leak into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch home directory plus the config file path inside it.
pub struct Kitchen {
    pub home: TempDir,
    pub config_path: PathBuf,
}

impl Kitchen {
    /// A kitchen without a config file.
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("Failed to create temp home");
        let config_path = home.path().join("cookbook.yaml");
        Self { home, config_path }
    }

    /// A kitchen whose config file holds `content`.
    pub fn with_config(content: &str) -> Self {
        let kitchen = Self::new();
        fs::write(&kitchen.config_path, content).expect("Failed to write config file");
        kitchen
    }

    /// The `cookbook` binary, isolated in this kitchen.
    pub fn cookbook(&self) -> Command {
        let mut cmd = Command::cargo_bin("cookbook").expect("Failed to find cookbook binary");
        cmd.env("HOME", self.home.path())
            .env("COOKBOOK_CONFIG_PATH", &self.config_path)
            .env_remove("COOKBOOK_HEAT_LEVEL")
            .env_remove("COOKBOOK_TIMER")
            .env_remove("COOKBOOK_SPICE")
            .env_remove("COOKBOOK_CHEF")
            .env_remove("COOKBOOK_DRY_RUN")
            .env_remove("RUST_LOG");
        cmd
    }
}
