//! # Bake Command
//!
//! File: moult/src/commands/bake.rs
//!
//! Kept for old scripts. Hidden from help and announces its replacement.
//!
use moult::{Command, Context, Result, WithDeprecated, WithExecute};

#[derive(Debug, Default)]
pub struct Bake;

impl Command for Bake {
    fn usage(&self) -> &str {
        "bake"
    }

    moult::capabilities!(deprecated, execute);
}

impl WithDeprecated for Bake {
    fn deprecated(&self) -> String {
        "use \"cook\" instead".to_string()
    }
}

impl WithExecute for Bake {
    fn execute(&mut self, _ctx: &Context) -> Result<()> {
        println!("Baked.");
        Ok(())
    }
}
