//! # Environment Access (`common::environment`)
//!
//! File: moult/src/common/environment.rs
//!
//! The configuration resolver never reads `std::env` directly. It asks an
//! `Environment`, so that embedders and tests can hand it a fixed set of
//! variables instead of mutating the process environment.
//!
use std::collections::HashMap;

/// A source of environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` when it is unset or not valid
    /// unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Builds the environment variable name for a configuration key:
/// `{PREFIX}_{KEY}` uppercased, with `.` and `-` replaced by `_`. An empty
/// prefix yields just the key.
pub fn env_var_name(prefix: &str, key: &str) -> String {
    let key = key.replace(['.', '-'], "_");
    if prefix.is_empty() {
        key.to_uppercase()
    } else {
        format!("{prefix}_{key}").to_uppercase()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name_normalizes_separators() {
        assert_eq!(env_var_name("cookbook", "heat-level"), "COOKBOOK_HEAT_LEVEL");
        assert_eq!(env_var_name("App", "db.pool-size"), "APP_DB_POOL_SIZE");
        assert_eq!(env_var_name("", "verbose"), "VERBOSE");
    }

    #[test]
    fn test_map_environment() {
        let env = HashMap::from([("A".to_string(), "1".to_string())]);
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B"), None);
    }
}
