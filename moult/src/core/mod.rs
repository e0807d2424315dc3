//! # Moult Core Infrastructure
//!
//! File: moult/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure the command engine is built on:
//! error types, the dynamic value model shared by every configuration layer,
//! and the layered configuration resolver itself.
//!
//! ## Architecture
//!
//! - `config`: layered resolution of a configuration struct (defaults, config
//!   file, environment, flags)
//! - `error`: the `MoultError` enum, the crate-wide `Result` alias and exit
//!   code mapping
//! - `value`: the `Value` enum and config document flattening
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config::{parse_config, BoundFlag, UserConfig};
//! use crate::core::error::{MoultError, Result};
//! use crate::core::value::Value;
//! ```
//!
pub mod config;
pub mod error;
pub mod value;
