//! # Serve Command
//!
//! File: moult/src/commands/serve.rs
//!
//! Asks before serving a table of guests. Serving a single guest needs no
//! confirmation.
//!
use moult::{
    Command, Confirmation, Console, Context, Docs, Field, Flags, Result, TaggedStruct,
    WithDocs, WithExecute, WithFlags, WithPrompt,
};

#[derive(Debug, Clone, Default)]
pub struct ServeFlags {
    pub guests: u32,
}

impl TaggedStruct for ServeFlags {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("guests", &mut self.guests)
            .long("guests")
            .short("g")
            .usage("number of guests")]
    }
}

#[derive(Debug, Default)]
pub struct Serve {
    flags: ServeFlags,
}

impl Command for Serve {
    fn usage(&self) -> &str {
        "serve"
    }

    moult::capabilities!(flags, docs, prompt, execute);
}

impl WithFlags for Serve {
    fn flags(&mut self) -> Result<Flags<'_>> {
        let mut flags = Flags::build(&mut self.flags)?;
        flags.set_default("guests", 4u32);
        Ok(flags)
    }
}

impl WithDocs for Serve {
    fn docs(&self) -> Docs {
        Docs {
            short: "Serve dinner".to_string(),
            example: "cookbook serve --guests 6".to_string(),
            beta: true,
            ..Docs::default()
        }
    }
}

impl WithPrompt for Serve {
    fn prompt(&mut self, console: &mut Console) -> Result<Confirmation> {
        let question = format!("Serve dinner for {} guests?", self.flags.guests);
        if console.ask_yes_no(&question, false)? {
            Ok(Confirmation::Accepted)
        } else {
            Ok(Confirmation::Declined("Dinner is not served.".to_string()))
        }
    }

    fn skip_prompt(&self) -> bool {
        self.flags.guests <= 1
    }
}

impl WithExecute for Serve {
    fn execute(&mut self, _ctx: &Context) -> Result<()> {
        println!("Dinner is served for {}.", self.flags.guests);
        Ok(())
    }
}
