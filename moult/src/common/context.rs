//! # Execution Context (`common::context`)
//!
//! File: moult/src/common/context.rs
//!
//! ## Overview
//!
//! The `Context` is what a command's work function receives. It carries:
//! - a `CancellationToken` that the caller (or a Ctrl-C handler) can trigger;
//!   long-running commands poll `is_cancelled()` or hand the token to their
//!   own async machinery,
//! - the resolved command path (`["cookbook", "cook"]`),
//! - the rendered help of the running command, so a work function can print
//!   its own usage when it decides the arguments make no sense.
//!
//! Cancellation is cooperative: nothing in Moult interrupts a blocking
//! confirmation prompt, the token is only observed once the work function
//! runs.
//!
use crate::core::error::Result;
use anyhow::Context as _;
use tokio_util::sync::CancellationToken;

/// Cancellable execution context handed to hooks and work functions.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    path: Vec<String>,
    help: String,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context driven by an existing cancellation token.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels this context when the process receives Ctrl-C. Only one
    /// handler can be installed per process.
    pub fn cancel_on_interrupt(&self) -> Result<()> {
        let token = self.token.clone();
        ctrlc::set_handler(move || token.cancel()).context("failed to install interrupt handler")
    }

    /// Names of the commands from the root to the running one.
    pub fn command_path(&self) -> &[String] {
        &self.path
    }

    /// Name of the running command; empty outside of an execution.
    pub fn command_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Help text of the running command.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Derives the per-command context. The token is shared with `self`.
    pub(crate) fn for_command(&self, path: Vec<String>, help: String) -> Self {
        Self {
            token: self.token.clone(),
            path,
            help,
        }
    }
}
