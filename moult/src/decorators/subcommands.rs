//! Builds and attaches the children of commands implementing
//! `WithSubCommands`, running each through the same engine.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};
use anyhow::Context;

#[derive(Debug, Clone, Copy, Default)]
pub struct SubCommandsDecorator;

impl Decorator for SubCommandsDecorator {
    fn decorate(&self, engine: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        let Some(v) = value.as_subcommands() else {
            return Ok(());
        };
        for sub in v.sub_commands() {
            let usage = sub.usage().to_string();
            let child = engine
                .build_boxed(sub)
                .with_context(|| format!("failed to build subcommand {usage:?}"))?;
            cmd.add_child(child);
        }
        Ok(())
    }
}
