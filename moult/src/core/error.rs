//! # Moult Error Types
//!
//! File: moult/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Moult. Every failure the
//! library can distinguish has its own `MoultError` variant; everything else
//! (errors returned by user hooks, I/O failures while reading a prompt answer,
//! clap parse errors) travels as an `anyhow::Error` with context attached.
//!
//! ## Architecture
//!
//! The errors fall into four groups:
//! - **Wiring mistakes** detected while building a command: malformed boolean
//!   tags, unsupported flag value types, defaults that disagree with their
//!   target type, duplicate flags.
//! - **Configuration errors** raised while resolving layered configuration:
//!   shape mismatches, unreadable or malformed config files, flag binding and
//!   decoding failures.
//! - **User-interaction outcomes**: an aborted text confirmation and a declined
//!   yes/no prompt. The latter maps to exit status 1 without further output.
//! - **Decorator errors**, which are plain `anyhow` context layers naming the
//!   decorator that failed.
//!
//! ## Examples
//!
//! ```rust,ignore
//! match built.execute() {
//!     Ok(()) => {}
//!     Err(e) if matches!(e.downcast_ref::<MoultError>(), Some(MoultError::Aborted)) => {
//!         eprintln!("Nothing was changed.");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Moult library.
#[derive(Error, Debug)]
pub enum MoultError {
    #[error("error parsing tag {tag:?}: {value:?} is not a valid boolean")]
    InvalidTag { tag: &'static str, value: String },

    #[error("invalid shorthand {short:?} for flag {flag:?}: expected a single character")]
    InvalidShorthand { flag: String, short: String },

    #[error("flag has neither a long nor a short name")]
    UnnamedFlag,

    #[error("unexpected flag value type for flag {flag:?}")]
    UnsupportedFlagType { flag: String },

    #[error("default value of flag {flag:?} does not match its target type {expected}")]
    DefaultMismatch { flag: String, expected: &'static str },

    #[error("flag {flag:?} is already defined on command {command:?}")]
    DuplicateFlag { flag: String, command: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("fatal error config file {path}: {reason}")]
    ConfigFile { path: String, reason: String },

    #[error("error binding flag {flag:?}: {reason}")]
    FlagBinding { flag: String, reason: String },

    #[error("error unmarshalling config key {key:?}: {reason}")]
    Decode { key: String, reason: String },

    #[error("required flag(s) {0} not set")]
    MissingRequired(String),

    #[error("action aborted")]
    Aborted,

    #[error("{0}")]
    Declined(String),
}

/// Type alias for Result using anyhow::Error, shared by hooks and the builder.
pub type Result<T> = anyhow::Result<T>;

/// Maps an error to the exit status a CLI should terminate with.
///
/// clap's own errors carry their exit code (0 for `--help`); everything else
/// exits with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
        return clap_err.exit_code();
    }
    1
}
