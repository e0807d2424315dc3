//! # Moult Capability Decorators (`decorators`)
//!
//! File: moult/src/decorators/mod.rs
//!
//! ## Overview
//!
//! One decorator per capability. Each probes the command value for its
//! capability, does nothing when it is absent, and otherwise performs a single
//! mutation of the `CommandDef`: setting a field, registering flags, attaching
//! children, or appending a pre-run or run hook. Hooks are appended, never
//! replaced, so their relative order follows the engine's decorator order.
//!
//! ## Default order
//!
//! | decorator                 | capability      | kind of mutation            |
//! |---------------------------|-----------------|-----------------------------|
//! | `LoggerDecorator`         | `WithLogger`    | hands out a dispatcher      |
//! | `AliasesDecorator`        | `WithAliases`   | aliases                     |
//! | `FlagsDecorator`          | `WithFlags`     | flag registration           |
//! | `ParsingConfigDecorator`  | `WithConfig`    | pre-run: resolve config     |
//! | `DocsDecorator`           | `WithDocs`      | help texts                  |
//! | `HiddenDecorator`         | `WithHidden`    | hidden                      |
//! | `SubCommandsDecorator`    | `WithSubCommands` | children                  |
//! | `DeprecatedDecorator`     | `WithDeprecated` | hidden + pre-run notice    |
//! | `ArgsDecorator`           | `WithArgs`      | pre-run: positional args    |
//! | `ConfirmDecorator`        | `WithConfirm`   | run: typed confirmation     |
//! | `PromptDecorator`         | `WithPrompt`    | run: yes/no prompt          |
//! | `ExecuteDecorator`        | `WithExecute`   | run: work function          |
//!
//! The confirmation and prompt decorators share the `--force`/`-f` and hidden
//! `--yolo` bypass flags; a command with both capabilities gets them once.
//!
mod aliases;
mod args;
mod config;
mod confirm;
mod deprecated;
mod docs;
mod execute;
mod flags;
mod hidden;
mod logger;
mod prompt;
mod subcommands;

pub use aliases::AliasesDecorator;
pub use args::ArgsDecorator;
pub use config::ParsingConfigDecorator;
pub use confirm::ConfirmDecorator;
pub use deprecated::DeprecatedDecorator;
pub use docs::DocsDecorator;
pub use execute::ExecuteDecorator;
pub use flags::FlagsDecorator;
pub use hidden::HiddenDecorator;
pub use logger::LoggerDecorator;
pub use prompt::PromptDecorator;
pub use subcommands::SubCommandsDecorator;

use crate::core::error::Result;
use crate::core::value::Value;
use crate::engine::built::{CommandDef, Invocation};
use crate::flags::kind::FlagKind;
use crate::flags::registered::RegisteredFlag;
use tracing::debug;

const FORCE: &str = "force";
const YOLO: &str = "yolo";

/// Registers `--force`/`-f` and the hidden `--yolo` unless the command
/// already has them.
fn register_bypass_flags(cmd: &mut CommandDef) -> Result<()> {
    if !cmd.has_flag(FORCE) {
        let short = (!cmd.has_shorthand('f')).then_some('f');
        cmd.add_flag(bypass_flag(FORCE, short, false))?;
    }
    if !cmd.has_flag(YOLO) {
        cmd.add_flag(bypass_flag(YOLO, None, true))?;
    }
    Ok(())
}

fn bypass_flag(long: &str, short: Option<char>, hidden: bool) -> RegisteredFlag {
    RegisteredFlag {
        long: long.to_string(),
        short,
        usage: "skip confirmation prompt".to_string(),
        required: false,
        persistent: false,
        hidden,
        kind: FlagKind::Bool,
        default: Value::Bool(false),
    }
}

/// Whether `--force` or `--yolo` is in effect.
fn bypassed(inv: &Invocation<'_>) -> Result<bool> {
    for name in [FORCE, YOLO] {
        if let Some(value) = inv.flag_value(name)? {
            if value.to_bool().unwrap_or(false) {
                debug!("Skipping confirmation: --{} is set", name);
                return Ok(true);
            }
        }
    }
    Ok(false)
}
