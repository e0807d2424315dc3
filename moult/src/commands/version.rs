use moult::{Command, Context, Docs, Result, WithDocs, WithExecute};

#[derive(Debug, Default)]
pub struct Version;

impl Command for Version {
    fn usage(&self) -> &str {
        "version"
    }

    moult::capabilities!(docs, execute);
}

impl WithDocs for Version {
    fn docs(&self) -> Docs {
        Docs {
            short: "Print the version".to_string(),
            ..Docs::default()
        }
    }
}

impl WithExecute for Version {
    fn execute(&mut self, _ctx: &Context) -> Result<()> {
        println!("cookbook {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
