//! Hides commands implementing `WithHidden` from command listings.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenDecorator;

impl Decorator for HiddenDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if let Some(v) = value.as_hidden() {
            cmd.hidden = v.hidden();
        }
        Ok(())
    }
}
