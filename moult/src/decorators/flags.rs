//! Registers the flags of commands implementing `WithFlags`.
//!
//! Each descriptor becomes a `RegisteredFlag` on the command. The default is
//! the descriptor's explicit default when it has one, the target's current
//! value otherwise, and it is written into the target right away so the
//! command sees it even when no hook ever runs.
use crate::core::error::{MoultError, Result};
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};
use crate::flags::registered::RegisteredFlag;
use crate::flags::Flag;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct FlagsDecorator;

impl Decorator for FlagsDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        let Some(v) = value.as_flags() else {
            return Ok(());
        };
        for flag in v.flags()? {
            let registered = register(flag)?;
            debug!(
                "Registered flag --{} ({}) on '{}'",
                registered.name(),
                registered.kind.type_name(),
                cmd.name
            );
            cmd.add_flag(registered)?;
        }
        Ok(())
    }
}

fn register(flag: Flag<'_>) -> Result<RegisteredFlag> {
    let name = flag.name().to_string();
    if name.is_empty() {
        return Err(MoultError::UnnamedFlag.into());
    }

    let short = if flag.short.is_empty() {
        None
    } else {
        let mut chars = flag.short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => {
                return Err(MoultError::InvalidShorthand {
                    flag: name,
                    short: flag.short.clone(),
                }
                .into())
            }
        }
    };

    let kind = flag
        .kind()
        .ok_or_else(|| MoultError::UnsupportedFlagType { flag: name.clone() })?;

    let default = match &flag.default {
        Some(d) => kind.capture(d.as_ref()).ok_or_else(|| MoultError::DefaultMismatch {
            flag: name.clone(),
            expected: kind.type_name(),
        })?,
        None => kind.capture(&*flag.target).unwrap_or_else(|| kind.zero()),
    };
    kind.assign(flag.target, &default)
        .map_err(|reason| MoultError::FlagBinding {
            flag: name.clone(),
            reason,
        })?;

    let usage = if flag.required {
        format!("{} (required)", flag.usage)
    } else {
        flag.usage
    };

    Ok(RegisteredFlag {
        long: flag.long,
        short,
        usage,
        required: flag.required,
        persistent: flag.persistent,
        hidden: flag.hidden,
        kind,
        default,
    })
}
