//! Runs the custom prompt of commands implementing `WithPrompt` before they
//! execute. A declined prompt prints its message and stops the command.
use super::{bypassed, register_bypass_flags};
use crate::core::error::{MoultError, Result};
use crate::engine::built::CommandDef;
use crate::engine::command::{Command, Confirmation};
use crate::engine::{Decorator, Engine};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptDecorator;

impl Decorator for PromptDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if value.as_prompt().is_none() {
            return Ok(());
        }
        register_bypass_flags(cmd)?;
        cmd.add_run(|inv| {
            if bypassed(inv)? {
                return Ok(());
            }
            let Some(v) = inv.command.as_prompt() else {
                return Ok(());
            };
            if v.skip_prompt() {
                debug!("Prompt skipped by the command");
                return Ok(());
            }
            match v.prompt(inv.console)? {
                Confirmation::Accepted => Ok(()),
                Confirmation::Declined(message) => {
                    inv.console.stdout(&format!("{message}\n"));
                    Err(MoultError::Declined(message).into())
                }
            }
        });
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::console::Console;
    use crate::common::context::Context;
    use crate::decorators::testing::run;
    use crate::engine::command::{WithConfirm, WithExecute, WithPrompt};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Serve {
        skip: bool,
        ran: Rc<Cell<bool>>,
    }

    impl Command for Serve {
        fn usage(&self) -> &str {
            "serve"
        }

        crate::capabilities!(prompt, execute);
    }

    impl WithPrompt for Serve {
        fn prompt(&mut self, console: &mut Console) -> Result<Confirmation> {
            if console.ask_yes_no("Serve now?", false)? {
                Ok(Confirmation::Accepted)
            } else {
                Ok(Confirmation::Declined("Dinner is not served.".to_string()))
            }
        }

        fn skip_prompt(&self) -> bool {
            self.skip
        }
    }

    impl WithExecute for Serve {
        fn execute(&mut self, _: &Context) -> Result<()> {
            self.ran.set(true);
            Ok(())
        }
    }

    fn serve(skip: bool) -> (crate::engine::built::BuiltCommand, Rc<Cell<bool>>) {
        let ran = Rc::new(Cell::new(false));
        let built = Engine::new()
            .build(Serve {
                skip,
                ran: ran.clone(),
            })
            .unwrap();
        (built, ran)
    }

    #[test]
    fn test_accepted_prompt_proceeds() {
        let (mut built, ran) = serve(false);
        let (result, out) = run(&mut built, &[], "y\n");
        result.unwrap();
        assert!(ran.get());
        assert_eq!(out, "Serve now? [y/N] ");
    }

    #[test]
    fn test_declined_prompt_prints_message_and_stops() {
        let (mut built, ran) = serve(false);
        let (result, out) = run(&mut built, &[], "n\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MoultError>(),
            Some(MoultError::Declined(m)) if m == "Dinner is not served."
        ));
        assert_eq!(out, "Serve now? [y/N] Dinner is not served.\n");
        assert!(!ran.get());
    }

    #[test]
    fn test_skip_and_bypass_flags() {
        let (mut built, ran) = serve(true);
        let (result, out) = run(&mut built, &[], "");
        result.unwrap();
        assert!(ran.get());
        assert_eq!(out, "");

        let (mut built, ran) = serve(false);
        run(&mut built, &["--yolo"], "").0.unwrap();
        assert!(ran.get());
    }

    struct Both;

    impl Command for Both {
        fn usage(&self) -> &str {
            "both"
        }

        crate::capabilities!(confirm, prompt);
    }

    impl WithConfirm for Both {
        fn value_to_confirm(&mut self, _: &Context) -> String {
            "both".to_string()
        }
    }

    impl WithPrompt for Both {
        fn prompt(&mut self, _: &mut Console) -> Result<Confirmation> {
            Ok(Confirmation::Accepted)
        }
    }

    #[test]
    fn test_bypass_flags_are_shared_with_confirm() {
        let built = Engine::new().build(Both).unwrap();
        let names: Vec<String> = built.def().flags().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["force", "yolo"]);
        assert_eq!(built.def().run_hooks(), 2);
    }
}
