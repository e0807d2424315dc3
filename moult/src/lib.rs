//! # Moult
//!
//! File: moult/src/lib.rs
//!
//! ## Overview
//!
//! Moult builds command-line programs from plain values. A command is a type
//! implementing [`Command`] plus any number of small capability traits
//! (`WithFlags`, `WithConfig`, `WithExecute`, ...). An [`Engine`] runs the
//! value through an ordered pipeline of [`Decorator`]s, one per capability,
//! and produces a [`BuiltCommand`] that parses arguments with clap and runs
//! the hooks the decorators attached.
//!
//! Next to the engine sits a layered configuration resolver
//! ([`parse_config`]) that fills a struct from defaults, a config file,
//! environment variables and command-line flags.
//!
//! ## Architecture
//!
//! - `engine`: the `Command` contract, the capability traits, the builder
//!   pipeline and the built command tree.
//! - `decorators`: the twelve default decorators.
//! - `flags`: flag descriptors, reflection over tagged structs and the closed
//!   set of supported flag types.
//! - `core`: errors, dynamic values and the configuration resolver.
//! - `common`: console I/O, the execution context, environment access and
//!   duration parsing.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use moult::{capabilities, Command, Context, Engine, Result, WithExecute};
//!
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn usage(&self) -> &str {
//!         "hello"
//!     }
//!
//!     capabilities!(execute);
//! }
//!
//! impl WithExecute for Hello {
//!     fn execute(&mut self, _ctx: &Context) -> Result<()> {
//!         println!("hello");
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     Engine::new().build(Hello)?.run_or_exit()
//! }
//! ```
//!
pub mod common;
pub mod core;
pub mod decorators;
pub mod engine;
pub mod flags;

pub use crate::common::console::{CapturedOutput, Console, DefaultOutput, Output};
pub use crate::common::context::Context;
pub use crate::common::environment::{Environment, ProcessEnv};
pub use crate::core::config::{load_config_file, parse_config, BoundFlag, UserConfig};
pub use crate::core::error::{exit_code, MoultError, Result};
pub use crate::core::value::Value;
pub use crate::engine::built::{BuiltCommand, CommandDef, Hook, Invocation};
pub use crate::engine::command::{
    Command, Confirmation, Docs, WithAliases, WithArgs, WithConfig, WithConfirm, WithDeprecated,
    WithDocs, WithExecute, WithFlags, WithHidden, WithLogger, WithPrompt, WithSubCommands,
};
pub use crate::engine::{Decorator, Engine, EngineBuilder};
pub use crate::flags::kind::FlagKind;
pub use crate::flags::registered::RegisteredFlag;
pub use crate::flags::tagged::{Field, Slot, TaggedStruct};
pub use crate::flags::{Flag, Flags};
