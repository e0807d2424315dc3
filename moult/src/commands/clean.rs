//! # Clean Command
//!
//! File: moult/src/commands/clean.rs
//!
//! Empties the pantry after the user types `pantry` back (or passes
//! `--force`).
//!
use moult::{Command, Context, Docs, Result, WithConfirm, WithDocs, WithExecute};

#[derive(Debug, Default)]
pub struct Clean;

impl Command for Clean {
    fn usage(&self) -> &str {
        "clean"
    }

    moult::capabilities!(docs, confirm, execute);
}

impl WithDocs for Clean {
    fn docs(&self) -> Docs {
        Docs {
            short: "Throw out everything in the pantry".to_string(),
            ..Docs::default()
        }
    }
}

impl WithConfirm for Clean {
    fn value_to_confirm(&mut self, _ctx: &Context) -> String {
        "pantry".to_string()
    }
}

impl WithExecute for Clean {
    fn execute(&mut self, ctx: &Context) -> Result<()> {
        if ctx.is_cancelled() {
            return Ok(());
        }
        println!("The pantry is empty.");
        Ok(())
    }
}
