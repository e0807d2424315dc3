//! Runs the work function of commands implementing `WithExecute`.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteDecorator;

impl Decorator for ExecuteDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if value.as_execute().is_none() {
            return Ok(());
        }
        cmd.add_run(|inv| match inv.command.as_execute() {
            Some(v) => v.execute(inv.context),
            None => Ok(()),
        });
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::context::Context;
    use crate::decorators::testing::run;
    use crate::engine::command::WithExecute;
    use anyhow::anyhow;

    struct Work {
        fail: bool,
    }

    impl Command for Work {
        fn usage(&self) -> &str {
            "work"
        }

        crate::capabilities!(execute);
    }

    impl WithExecute for Work {
        fn execute(&mut self, ctx: &Context) -> Result<()> {
            assert_eq!(ctx.command_name(), "work");
            if self.fail {
                return Err(anyhow!("boom"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_execute_makes_command_runnable() {
        let mut built = Engine::new().build(Work { fail: false }).unwrap();
        assert!(built.def().is_runnable());
        assert_eq!(built.def().run_hooks(), 1);
        run(&mut built, &[], "").0.unwrap();
    }

    #[test]
    fn test_execute_error_is_returned() {
        let mut built = Engine::new().build(Work { fail: true }).unwrap();
        let err = run(&mut built, &[], "").0.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
