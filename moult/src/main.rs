//! # Cookbook Main Entry Point
//!
//! File: moult/src/main.rs
//!
//! ## Overview
//!
//! A demo CLI built entirely from moult capabilities. It handles:
//! - Setting up the logging system from `RUST_LOG`
//! - Building the command tree from the values in `commands`
//! - Running the selected command and reporting any error
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! cookbook --help
//!
//! # Cook with debug logging
//! RUST_LOG=debug cookbook cook --heat-level 7
//! ```
//!
//! Command processing flow:
//! 1. Configure logging (before the engine hands out the logger)
//! 2. Build the command tree through the default decorators
//! 3. Parse arguments, run the selected command's hooks
//! 4. Print any error and exit with the matching status
//!
use moult::Engine;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cookbook = Engine::new().build(commands::Cookbook::default())?;
    tracing::debug!("Built command tree: {:?}", cookbook.def().name);
    cookbook.run_or_exit()
}
