//! Hides commands implementing `WithDeprecated` and prints a notice before
//! they run. The notice is left out when `--json` was given, so that machine
//! readable output stays clean.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedDecorator;

impl Decorator for DeprecatedDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        let Some(v) = value.as_deprecated() else {
            return Ok(());
        };
        let message = v.deprecated();
        cmd.hidden = true;
        cmd.add_pre_run(move |inv| {
            if inv.is_set("json") {
                return Ok(());
            }
            let start = inv.path.len().saturating_sub(2);
            let name = inv.path[start..].join(" ");
            inv.console
                .stdout(&format!("Command {name:?} is deprecated, {message}\n"));
            Ok(())
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
    use crate::engine::command::{WithDeprecated, WithExecute, WithFlags, WithSubCommands};
    use crate::flags::{Flag, Flags};

    struct Old {
        json: bool,
    }

    impl Command for Old {
        fn usage(&self) -> &str {
            "old"
        }

        crate::capabilities!(flags, deprecated, execute);
    }

    impl WithFlags for Old {
        fn flags(&mut self) -> Result<Flags<'_>> {
            Ok(Flags::from_iter([Flag::new("json", &mut self.json)]))
        }
    }

    impl WithDeprecated for Old {
        fn deprecated(&self) -> String {
            "use \"new\" instead".to_string()
        }
    }

    impl WithExecute for Old {
        fn execute(&mut self, _: &Context) -> Result<()> {
            Ok(())
        }
    }

    struct Root;

    impl Command for Root {
        fn usage(&self) -> &str {
            "app"
        }

        crate::capabilities!(subcommands);
    }

    impl WithSubCommands for Root {
        fn sub_commands(&mut self) -> Vec<Box<dyn Command>> {
            vec![Box::new(Old { json: false })]
        }
    }

    #[test]
    fn test_notice_is_qualified_by_parent() {
        let mut built = Engine::new().build(Root).unwrap();
        assert!(built.child("old").unwrap().def().hidden);

        let (result, out) = run(&mut built, &["old"], "");
        result.unwrap();
        assert_eq!(
            out,
            "Command \"app old\" is deprecated, use \"new\" instead\n"
        );
    }

    #[test]
    fn test_notice_is_skipped_for_json_output() {
        let mut built = Engine::new().build(Root).unwrap();
        let (result, out) = run(&mut built, &["old", "--json"], "");
        result.unwrap();
        assert_eq!(out, "");
    }
}
