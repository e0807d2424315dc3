//! Sets the help texts of commands implementing `WithDocs`.
use crate::core::error::Result;
use crate::engine::built::CommandDef;
use crate::engine::command::Command;
use crate::engine::{Decorator, Engine};

#[derive(Debug, Clone, Copy, Default)]
pub struct DocsDecorator;

impl Decorator for DocsDecorator {
    fn decorate(&self, _: &Engine, cmd: &mut CommandDef, value: &mut dyn Command) -> Result<()> {
        let Some(v) = value.as_docs() else {
            return Ok(());
        };
        let docs = v.docs();
        cmd.short = if docs.beta {
            format!("{} (Beta)", docs.short)
        } else {
            docs.short
        };
        cmd.long = docs.long;
        cmd.example = docs.example;
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::{Docs, WithDocs};

    struct Documented {
        beta: bool,
    }

    impl Command for Documented {
        fn usage(&self) -> &str {
            "documented"
        }

        crate::capabilities!(docs);
    }

    impl WithDocs for Documented {
        fn docs(&self) -> Docs {
            Docs {
                short: "Short text".into(),
                long: "A much longer text.".into(),
                example: "documented --now".into(),
                beta: self.beta,
            }
        }
    }

    #[test]
    fn test_docs_are_copied() {
        let built = Engine::new().build(Documented { beta: false }).unwrap();
        let def = built.def();
        assert_eq!(def.short, "Short text");
        assert_eq!(def.long, "A much longer text.");
        assert_eq!(def.example, "documented --now");

        let help = built.to_clap().render_long_help().to_string();
        assert!(help.contains("Examples:\ndocumented --now"), "{help}");
    }

    #[test]
    fn test_beta_marker_is_appended() {
        let built = Engine::new().build(Documented { beta: true }).unwrap();
        assert_eq!(built.def().short, "Short text (Beta)");
    }
}
