//! Hands a `tracing` dispatcher to commands implementing `WithLogger`.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};
use tracing::Dispatch;

/// Provides the logger. Without an injected dispatcher the current default
/// dispatcher is handed out.
#[derive(Debug, Clone, Default)]
pub struct LoggerDecorator {
    dispatch: Option<Dispatch>,
}

impl LoggerDecorator {
    /// Hands `dispatch` to every command instead of the global default.
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }
}

impl Decorator for LoggerDecorator {
    fn decorate(&self, _: &Engine, _: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        let Some(v) = value.as_logger() else {
            return Ok(());
        };
        let dispatch = match &self.dispatch {
            Some(dispatch) => dispatch.clone(),
            None => tracing::dispatcher::get_default(Dispatch::clone),
        };
        v.logger(dispatch);
        Ok(())
    }
}
