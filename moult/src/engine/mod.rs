//! # Moult Engine (`engine`)
//!
//! File: moult/src/engine/mod.rs
//!
//! ## Overview
//!
//! The `Engine` turns command values into runnable commands. It holds an
//! ordered list of decorators; building a command starts a bare `CommandDef`
//! carrying the value's usage line and hands it, together with the value, to
//! each decorator in turn. A decorator that does not recognize the value's
//! capability does nothing. The first decorator that fails aborts the build,
//! and its error names the decorator.
//!
//! ## Architecture
//!
//! - **`command`**: the `Command` trait, the capability traits and the
//!   `capabilities!` macro.
//! - **`built`**: `CommandDef` (what decorators mutate), `BuiltCommand` (what
//!   the engine returns) and execution.
//! - **this module**: the `Decorator` trait, the `Engine` and its builder.
//!
//! The decorator list is fixed when the engine is built. Adding a decorator
//! whose type is already in the list replaces that entry in place; a new type
//! is appended.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let engine = Engine::builder()
//!     .decorator(LoggerDecorator::new(dispatch))
//!     .build();
//! engine.build(RootCommand::default())?.run_or_exit();
//! ```
//!
pub mod built;
pub mod command;

use crate::core::error::Result;
use crate::decorators::{
    AliasesDecorator, ArgsDecorator, ConfirmDecorator, DeprecatedDecorator, DocsDecorator,
    ExecuteDecorator, FlagsDecorator, HiddenDecorator, LoggerDecorator, ParsingConfigDecorator,
    PromptDecorator, SubCommandsDecorator,
};
use anyhow::Context as _;
use built::{BuiltCommand, CommandDef};
use command::Command;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use tracing::trace;

/// Applies one capability to a command under construction.
pub trait Decorator: Any {
    fn decorate(&self, engine: &Engine, cmd: &mut CommandDef, value: &mut dyn Command)
        -> Result<()>;
}

struct Registered {
    kind: TypeId,
    name: &'static str,
    decorator: Box<dyn Decorator>,
}

impl Registered {
    fn new<D: Decorator>(decorator: D) -> Self {
        Self {
            kind: TypeId::of::<D>(),
            name: short_type_name(type_name::<D>()),
            decorator: Box::new(decorator),
        }
    }
}

/// `moult::decorators::flags::FlagsDecorator` becomes `FlagsDecorator`.
/// Generic types keep their full name.
fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

/// Builds commands from command values.
pub struct Engine {
    decorators: Vec<Registered>,
}

impl Engine {
    /// An engine with the default decorators.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A builder starting from the default decorators.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Names of the decorators, in application order.
    pub fn decorator_names(&self) -> Vec<&'static str> {
        self.decorators.iter().map(|d| d.name).collect()
    }

    pub fn build<C: Command>(&self, command: C) -> Result<BuiltCommand> {
        self.build_boxed(Box::new(command))
    }

    pub fn build_boxed(&self, mut command: Box<dyn Command>) -> Result<BuiltCommand> {
        let mut def = CommandDef::new(command.usage().to_string());
        for registered in &self.decorators {
            trace!("Applying {} to '{}'", registered.name, def.name);
            registered
                .decorator
                .decorate(self, &mut def, command.as_mut())
                .with_context(|| format!("failed to decorate command with {}", registered.name))?;
        }
        Ok(BuiltCommand::new(def, command))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("decorators", &self.decorator_names())
            .finish()
    }
}

/// Configures the decorator list of an `Engine`.
pub struct EngineBuilder {
    decorators: Vec<Registered>,
}

impl EngineBuilder {
    /// Starts from an empty decorator list.
    pub fn without_default_decorators(mut self) -> Self {
        self.decorators.clear();
        self
    }

    /// Replaces the decorator of the same type, keeping its position, or
    /// appends it.
    pub fn decorator<D: Decorator>(mut self, decorator: D) -> Self {
        let registered = Registered::new(decorator);
        match self.decorators.iter_mut().find(|d| d.kind == registered.kind) {
            Some(existing) => *existing = registered,
            None => self.decorators.push(registered),
        }
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            decorators: self.decorators,
        }
    }
}

impl Default for EngineBuilder {
    /// The default decorators. Flags are registered before configuration is
    /// parsed, and the confirmation and prompt hooks are installed before the
    /// work function.
    fn default() -> Self {
        Self {
            decorators: vec![
                Registered::new(LoggerDecorator::default()),
                Registered::new(AliasesDecorator),
                Registered::new(FlagsDecorator),
                Registered::new(ParsingConfigDecorator::default()),
                Registered::new(DocsDecorator),
                Registered::new(HiddenDecorator),
                Registered::new(SubCommandsDecorator),
                Registered::new(DeprecatedDecorator),
                Registered::new(ArgsDecorator),
                Registered::new(ConfirmDecorator),
                Registered::new(PromptDecorator),
                Registered::new(ExecuteDecorator),
            ],
        }
    }
}
