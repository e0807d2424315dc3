//! # Commands and Capabilities (`engine::command`)
//!
//! File: moult/src/engine/command.rs
//!
//! ## Overview
//!
//! A command is any value implementing `Command`. The only thing every command
//! must provide is its usage line; everything else is an optional capability,
//! a small trait the command value may also implement:
//!
//! | capability          | trait             | effect on the built command                 |
//! |---------------------|-------------------|---------------------------------------------|
//! | logger              | `WithLogger`      | receives a `tracing::Dispatch`              |
//! | aliases             | `WithAliases`     | alternate invocation names                  |
//! | flags               | `WithFlags`       | flags registered from descriptors           |
//! | configuration       | `WithConfig`      | layered configuration resolved before run   |
//! | documentation       | `WithDocs`        | short/long help, examples                   |
//! | hidden              | `WithHidden`      | left out of command listings                |
//! | subcommands         | `WithSubCommands` | child commands built through the same engine |
//! | deprecation         | `WithDeprecated`  | hidden, prints a notice when used           |
//! | positional args     | `WithArgs`        | receives the raw positional arguments       |
//! | text confirmation   | `WithConfirm`     | user must type an exact value               |
//! | yes/no prompt       | `WithPrompt`      | command asks its own yes/no question        |
//! | execution           | `WithExecute`     | the work function                           |
//!
//! ## Architecture
//!
//! The engine discovers capabilities at runtime through the `as_*` probes on
//! `Command`, each returning `None` unless overridden. Implementing a
//! capability trait is therefore not enough: the probe must be switched on
//! too, which is what the `capabilities!` macro does.
//!
//! ## Examples
//!
//! ```rust,ignore
//! struct Version;
//!
//! impl Command for Version {
//!     fn usage(&self) -> &str {
//!         "version"
//!     }
//!
//!     moult::capabilities!(docs, execute);
//! }
//!
//! impl WithDocs for Version {
//!     fn docs(&self) -> Docs {
//!         Docs { short: "Print the version".into(), ..Docs::default() }
//!     }
//! }
//!
//! impl WithExecute for Version {
//!     fn execute(&mut self, _ctx: &Context) -> Result<()> {
//!         println!("{}", env!("CARGO_PKG_VERSION"));
//!         Ok(())
//!     }
//! }
//! ```
//!
use crate::common::console::Console;
use crate::common::context::Context;
use crate::core::config::UserConfig;
use crate::core::error::Result;
use crate::flags::Flags;
use tracing::Dispatch;

/// A command value the engine can build.
///
/// `usage` is the one-line usage message; its first word is the command
/// name. Recommended syntax: `[ ]` marks optional arguments, `...` repetition,
/// `|` mutually exclusive alternatives and `{ }` a required choice, e.g.
/// `add [-F file | -D dir]... [-f format] profile`.
pub trait Command: 'static {
    fn usage(&self) -> &str;

    fn as_logger(&mut self) -> Option<&mut dyn WithLogger> {
        None
    }
    fn as_aliases(&self) -> Option<&dyn WithAliases> {
        None
    }
    fn as_flags(&mut self) -> Option<&mut dyn WithFlags> {
        None
    }
    fn as_config(&mut self) -> Option<&mut dyn WithConfig> {
        None
    }
    fn as_docs(&self) -> Option<&dyn WithDocs> {
        None
    }
    fn as_hidden(&self) -> Option<&dyn WithHidden> {
        None
    }
    fn as_subcommands(&mut self) -> Option<&mut dyn WithSubCommands> {
        None
    }
    fn as_deprecated(&self) -> Option<&dyn WithDeprecated> {
        None
    }
    fn as_args(&mut self) -> Option<&mut dyn WithArgs> {
        None
    }
    fn as_confirm(&mut self) -> Option<&mut dyn WithConfirm> {
        None
    }
    fn as_prompt(&mut self) -> Option<&mut dyn WithPrompt> {
        None
    }
    fn as_execute(&mut self) -> Option<&mut dyn WithExecute> {
        None
    }
}

/// Receives the logger the command should use.
pub trait WithLogger {
    fn logger(&mut self, dispatch: Dispatch);
}

/// Names that can be used instead of the first word of the usage line.
pub trait WithAliases {
    fn aliases(&self) -> Vec<String>;
}

/// Flags of the command. Called once when the command is built and again on
/// every invocation to write the parsed values into their targets.
pub trait WithFlags {
    fn flags(&mut self) -> Result<Flags<'_>>;
}

/// Configuration resolved from defaults, config file, environment and flags
/// before the command runs.
pub trait WithConfig {
    fn config(&mut self) -> UserConfig<'_>;
}

/// Shown in the help output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    /// Short description shown in command listings.
    pub short: String,
    /// Long description shown in the command's own help.
    pub long: String,
    /// Usage examples.
    pub example: String,
    /// Appends ` (Beta)` to the short description.
    pub beta: bool,
}

pub trait WithDocs {
    fn docs(&self) -> Docs;
}

pub trait WithHidden {
    fn hidden(&self) -> bool;
}

pub trait WithSubCommands {
    fn sub_commands(&mut self) -> Vec<Box<dyn Command>>;
}

/// Marks the command deprecated. The message is printed after
/// `Command "<name>" is deprecated, `.
pub trait WithDeprecated {
    fn deprecated(&self) -> String;
}

/// Receives the positional arguments after the command name, before the
/// command runs.
pub trait WithArgs {
    fn args(&mut self, args: &[String]) -> Result<()>;
}

/// Requires the user to type an exact value before the command runs.
pub trait WithConfirm {
    fn value_to_confirm(&mut self, ctx: &Context) -> String;
}

/// Outcome of a yes/no prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    /// The user declined; the message is shown to them.
    Declined(String),
}

/// Asks the user a yes/no question before the command runs.
pub trait WithPrompt {
    fn prompt(&mut self, console: &mut Console) -> Result<Confirmation>;

    /// Skips the prompt, e.g. when every input was given on the command line.
    fn skip_prompt(&self) -> bool {
        false
    }
}

/// The work function.
pub trait WithExecute {
    fn execute(&mut self, ctx: &Context) -> Result<()>;
}

/// Switches on the capability probes of a `Command` implementation.
///
/// Accepts any of `logger`, `aliases`, `flags`, `config`, `docs`, `hidden`,
/// `subcommands`, `deprecated`, `args`, `confirm`, `prompt` and `execute`;
/// the type must implement the matching `With*` trait.
#[macro_export]
macro_rules! capabilities {
    (@one logger) => {
        fn as_logger(&mut self) -> ::std::option::Option<&mut dyn $crate::WithLogger> {
            ::std::option::Option::Some(self)
        }
    };
    (@one aliases) => {
        fn as_aliases(&self) -> ::std::option::Option<&dyn $crate::WithAliases> {
            ::std::option::Option::Some(self)
        }
    };
    (@one flags) => {
        fn as_flags(&mut self) -> ::std::option::Option<&mut dyn $crate::WithFlags> {
            ::std::option::Option::Some(self)
        }
    };
    (@one config) => {
        fn as_config(&mut self) -> ::std::option::Option<&mut dyn $crate::WithConfig> {
            ::std::option::Option::Some(self)
        }
    };
    (@one docs) => {
        fn as_docs(&self) -> ::std::option::Option<&dyn $crate::WithDocs> {
            ::std::option::Option::Some(self)
        }
    };
    (@one hidden) => {
        fn as_hidden(&self) -> ::std::option::Option<&dyn $crate::WithHidden> {
            ::std::option::Option::Some(self)
        }
    };
    (@one subcommands) => {
        fn as_subcommands(&mut self) -> ::std::option::Option<&mut dyn $crate::WithSubCommands> {
            ::std::option::Option::Some(self)
        }
    };
    (@one deprecated) => {
        fn as_deprecated(&self) -> ::std::option::Option<&dyn $crate::WithDeprecated> {
            ::std::option::Option::Some(self)
        }
    };
    (@one args) => {
        fn as_args(&mut self) -> ::std::option::Option<&mut dyn $crate::WithArgs> {
            ::std::option::Option::Some(self)
        }
    };
    (@one confirm) => {
        fn as_confirm(&mut self) -> ::std::option::Option<&mut dyn $crate::WithConfirm> {
            ::std::option::Option::Some(self)
        }
    };
    (@one prompt) => {
        fn as_prompt(&mut self) -> ::std::option::Option<&mut dyn $crate::WithPrompt> {
            ::std::option::Option::Some(self)
        }
    };
    (@one execute) => {
        fn as_execute(&mut self) -> ::std::option::Option<&mut dyn $crate::WithExecute> {
            ::std::option::Option::Some(self)
        }
    };
    ($($capability:ident),* $(,)?) => {
        $($crate::capabilities!(@one $capability);)*
    };
}
