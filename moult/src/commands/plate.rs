//! # Plate Command
//!
//! File: moult/src/commands/plate.rs
//!
//! Arranges the dishes given as positional arguments.
//!
use anyhow::bail;
use moult::{Command, Context, Docs, Result, WithAliases, WithArgs, WithDocs, WithExecute};

#[derive(Debug, Default)]
pub struct Plate {
    dishes: Vec<String>,
}

impl Command for Plate {
    fn usage(&self) -> &str {
        "plate <dish>..."
    }

    moult::capabilities!(aliases, docs, args, execute);
}

impl WithAliases for Plate {
    fn aliases(&self) -> Vec<String> {
        vec!["p".to_string(), "arrange".to_string()]
    }
}

impl WithDocs for Plate {
    fn docs(&self) -> Docs {
        Docs {
            short: "Arrange dishes on a plate".to_string(),
            example: "cookbook plate soup salad".to_string(),
            ..Docs::default()
        }
    }
}

impl WithArgs for Plate {
    fn args(&mut self, args: &[String]) -> Result<()> {
        if args.is_empty() {
            bail!("at least one dish is required");
        }
        self.dishes = args.to_vec();
        Ok(())
    }
}

impl WithExecute for Plate {
    fn execute(&mut self, _ctx: &Context) -> Result<()> {
        println!("Plated: {}", self.dishes.join(", "));
        Ok(())
    }
}
