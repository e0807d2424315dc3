//! # Moult Common Utilities Module (`common`)
//!
//! File: moult/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared plumbing that the command engine and the configuration resolver lean
//! on, but which has nothing command-specific about it:
//!
//! - **`console`**: input reader + output sink used for prompts and notices.
//! - **`context`**: the cancellable execution context passed to work functions.
//! - **`duration`**: the unit-suffixed duration syntax (`1h30m`).
//! - **`environment`**: environment variable access behind a trait.
//!
pub mod console;
pub mod context;
pub mod duration;
pub mod environment;
