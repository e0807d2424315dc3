//! Hands positional arguments to commands implementing `WithArgs`.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgsDecorator;

impl Decorator for ArgsDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if value.as_args().is_none() {
            return Ok(());
        }
        cmd.accepts_args = true;
        cmd.add_pre_run(|inv| match inv.command.as_args() {
            Some(v) => v.args(inv.args),
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
    use crate::engine::command::{WithArgs, WithExecute};
    use anyhow::bail;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Plate {
        dishes: Vec<String>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Command for Plate {
        fn usage(&self) -> &str {
            "plate [dish...]"
        }

        crate::capabilities!(args, execute);
    }

    impl WithArgs for Plate {
        fn args(&mut self, args: &[String]) -> Result<()> {
            if args.is_empty() {
                bail!("nothing to plate");
            }
            self.log.borrow_mut().push("args".to_string());
            self.dishes = args.to_vec();
            Ok(())
        }
    }

    impl WithExecute for Plate {
        fn execute(&mut self, _: &Context) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("execute {}", self.dishes.join(",")));
            Ok(())
        }
    }

    #[test]
    fn test_args_arrive_before_execution() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let plate = Plate {
            log: log.clone(),
            ..Plate::default()
        };
        let mut built = Engine::new().build(plate).unwrap();
        assert!(built.def().accepts_args);

        run(&mut built, &["soup", "salad"], "").0.unwrap();
        assert_eq!(*log.borrow(), ["args", "execute soup,salad"]);
    }

    #[test]
    fn test_rejected_args_stop_the_command() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let plate = Plate {
            log: log.clone(),
            ..Plate::default()
        };
        let mut built = Engine::new().build(plate).unwrap();

        let err = run(&mut built, &[], "").0.unwrap_err();
        assert_eq!(err.to_string(), "nothing to plate");
        assert!(log.borrow().is_empty());
    }
}
