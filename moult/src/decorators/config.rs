//! Resolves the configuration of commands implementing `WithConfig`.
//!
//! The resolution itself lives in `core::config`; this decorator only
//! schedules it as a pre-run hook, so that it sees the parsed flags of the
//! command that is actually selected.
use crate::common::environment::{Environment, ProcessEnv};
use crate::core::config::{parse_config, BoundFlag};
use crate::core::error::Result;
use crate::engine::built::{CommandDef, Invocation};
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};
use std::fmt;
use std::sync::Arc;

/// Schedules configuration resolution. Environment variables are read from
/// the process unless another `Environment` is supplied.
#[derive(Clone)]
pub struct ParsingConfigDecorator {
    env: Arc<dyn Environment + Send + Sync>,
}

impl ParsingConfigDecorator {
    pub fn with_environment(env: impl Environment + Send + Sync + 'static) -> Self {
        Self { env: Arc::new(env) }
    }
}

impl Default for ParsingConfigDecorator {
    fn default() -> Self {
        Self::with_environment(ProcessEnv)
    }
}

impl fmt::Debug for ParsingConfigDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingConfigDecorator").finish_non_exhaustive()
    }
}

impl Decorator for ParsingConfigDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        if value.as_config().is_none() {
            return Ok(());
        }
        let env = Arc::clone(&self.env);
        cmd.add_pre_run(move |inv| resolve(inv, env.as_ref()));
        Ok(())
    }
}

fn resolve(inv: &mut Invocation<'_>, env: &dyn Environment) -> Result<()> {
    let bound = inv
        .flags
        .iter()
        .map(|f| {
            Ok(BoundFlag {
                name: f.name(),
                value: f.value(inv.matches)?,
                explicit: f.is_set(inv.matches),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let Some(provider) = inv.command.as_config() else {
        return Ok(());
    };
    parse_config(provider.config(), &bound, env)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::context::Context;
    use crate::core::config::UserConfig;
    use crate::decorators::testing::run;
    use crate::engine::command::{WithConfig, WithExecute, WithFlags};
    use crate::flags::tagged::{Field, TaggedStruct};
    use crate::flags::Flags;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io::Write;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Stove {
        heat_level: i64,
    }

    impl TaggedStruct for Stove {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::value("heat_level", &mut self.heat_level)
                .long("heat-level")
                .usage("how hot")]
        }
    }

    struct Cook {
        config: Stove,
        path: String,
        seen: Rc<Cell<i64>>,
    }

    impl Command for Cook {
        fn usage(&self) -> &str {
            "cook"
        }

        crate::capabilities!(flags, config, execute);
    }

    impl WithFlags for Cook {
        fn flags(&mut self) -> Result<Flags<'_>> {
            let mut flags = Flags::build(&mut self.config)?;
            flags.set_default("heat-level", 5i64);
            Ok(flags)
        }
    }

    impl WithConfig for Cook {
        fn config(&mut self) -> UserConfig<'_> {
            UserConfig::new("COOKBOOK", &mut self.config, Stove { heat_level: 5 })
                .with_path(self.path.clone())
        }
    }

    impl WithExecute for Cook {
        fn execute(&mut self, _: &Context) -> Result<()> {
            self.seen.set(self.config.heat_level);
            Ok(())
        }
    }

    fn heat(argv: &[&str], env: &[(&str, &str)], file: Option<&str>) -> i64 {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let path = match file {
            Some(content) => {
                tmp.write_all(content.as_bytes()).unwrap();
                tmp.path().display().to_string()
            }
            None => String::new(),
        };
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let engine = Engine::builder()
            .decorator(ParsingConfigDecorator::with_environment(env))
            .build();
        let seen = Rc::new(Cell::new(-1));
        let mut built = engine
            .build(Cook {
                config: Stove::default(),
                path,
                seen: seen.clone(),
            })
            .unwrap();
        run(&mut built, argv, "").0.unwrap();
        seen.get()
    }

    #[test]
    fn test_defaults_apply_without_other_layers() {
        assert_eq!(heat(&[], &[], None), 5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        assert_eq!(heat(&[], &[], Some("heat-level: 11\n")), 11);
    }

    #[test]
    fn test_environment_overrides_file() {
        assert_eq!(
            heat(&[], &[("COOKBOOK_HEAT_LEVEL", "33")], Some("heat-level: 11\n")),
            33
        );
    }

    #[test]
    fn test_explicit_flag_wins() {
        assert_eq!(
            heat(
                &["--heat-level", "22"],
                &[("COOKBOOK_HEAT_LEVEL", "33")],
                Some("heat-level: 11\n")
            ),
            22
        );
    }

    #[test]
    fn test_commands_without_config_get_no_hook() {
        struct Plain;
        impl Command for Plain {
            fn usage(&self) -> &str {
                "plain"
            }
        }
        let mut def = CommandDef::new("plain");
        ParsingConfigDecorator::default()
            .decorate(&Engine::new(), &mut def, &mut Plain)
            .unwrap();
        assert_eq!(def.pre_run_hooks(), 0);
    }
}
