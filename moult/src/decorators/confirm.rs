//! Asks the user to type a value back before commands implementing
//! `WithConfirm` run.
use super::{bypassed, register_bypass_flags};
use crate::core::error::{MoultError, Result};
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};
use anyhow::Context;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmDecorator;

impl Decorator for ConfirmDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if value.as_confirm().is_none() {
            return Ok(());
        }
        register_bypass_flags(cmd)?;
        cmd.add_run(|inv| {
            if bypassed(inv)? {
                return Ok(());
            }
            let Some(v) = inv.command.as_confirm() else {
                return Ok(());
            };
            let expected = v.value_to_confirm(inv.context);
            inv.console.stdout(&format!(
                "To proceed, type {expected:?} or re-run this command with --force\n▸ "
            ));
            let answer = inv
                .console
                .read_line()
                .context("failed to read user input")?;
            if answer != expected {
                debug!("Confirmation mismatch: expected {:?}", expected);
                return Err(MoultError::Aborted.into());
            }
            Ok(())
        });
        Ok(())
    }
}
