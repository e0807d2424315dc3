//! # Registered Flags (`flags::registered`)
//!
//! File: moult/src/flags/registered.rs
//!
//! A `RegisteredFlag` is what remains of a `Flag` descriptor once the flags
//! decorator has validated it: plain owned data (names, kind, default as a
//! `Value`) that can be rendered into a `clap::Arg` any number of times and
//! used to read that argument back out of parsed matches. It holds no write
//! target; targets are re-borrowed from the command value on every
//! invocation.
//!
use crate::core::error::MoultError;
use crate::core::value::Value;
use crate::flags::kind::FlagKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};

/// A validated flag attached to a command definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredFlag {
    /// Long name; may be empty for shorthand-only flags.
    pub long: String,
    pub short: Option<char>,
    /// Help text, with ` (required)` appended for required flags.
    pub usage: String,
    pub required: bool,
    pub persistent: bool,
    pub hidden: bool,
    pub kind: FlagKind,
    /// Value used when the flag is not given on the command line.
    pub default: Value,
}

impl RegisteredFlag {
    /// The flag's identifier: its long name, or its shorthand when it has no
    /// long name. Also the configuration key the flag is bound to.
    pub fn name(&self) -> String {
        if self.long.is_empty() {
            self.short.map(String::from).unwrap_or_default()
        } else {
            self.long.clone()
        }
    }

    /// Renders the flag as a clap argument.
    pub(crate) fn to_arg(&self) -> Arg {
        let mut help = self.usage.clone();
        if !self.default.is_zero() {
            help = format!("{help} [default: {}]", self.default).trim_start().to_string();
        }

        let mut arg = Arg::new(self.name())
            .help(help)
            .value_parser(self.kind.value_parser());
        if !self.long.is_empty() {
            arg = arg.long(self.long.clone());
        }
        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        arg = match self.kind {
            FlagKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            kind if kind.is_list() => arg.action(ArgAction::Append).value_delimiter(','),
            _ => arg.action(ArgAction::Set),
        };

        if self.persistent {
            // clap refuses required global args; those are checked after parsing.
            arg = arg.global(true);
        } else if self.required {
            arg = arg.required(true);
        }
        if self.hidden {
            arg = arg.hide(true);
        }
        arg
    }

    /// Whether the user supplied the flag on the command line.
    pub fn is_set(&self, matches: &ArgMatches) -> bool {
        matches!(
            matches.value_source(&self.name()),
            Some(ValueSource::CommandLine)
        )
    }

    /// The parsed value, if the flag was given.
    pub(crate) fn read(&self, matches: &ArgMatches) -> Result<Option<Value>, MoultError> {
        self.kind
            .read(matches, &self.name())
            .map_err(|e| MoultError::FlagBinding {
                flag: self.name(),
                reason: e.to_string(),
            })
    }

    /// The parsed value, falling back to the registered default.
    pub(crate) fn value(&self, matches: &ArgMatches) -> Result<Value, MoultError> {
        Ok(self.read(matches)?.unwrap_or_else(|| self.default.clone()))
    }
}
