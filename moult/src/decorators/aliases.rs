//! Sets the aliases of commands implementing `WithAliases`.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct AliasesDecorator;

impl Decorator for AliasesDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if let Some(v) = value.as_aliases() {
            cmd.aliases = v.aliases();
        }
        Ok(())
    }
}
