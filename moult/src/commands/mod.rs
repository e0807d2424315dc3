//! # Cookbook Commands
//!
//! File: moult/src/commands/mod.rs
//!
//! ## Overview
//!
//! The commands of the `cookbook` demo binary. Each one is a plain struct that
//! opts into moult capabilities; together they exercise every default
//! decorator:
//!
//! | command   | capabilities                                       |
//! |-----------|----------------------------------------------------|
//! | `cookbook`| docs, subcommands, persistent `--json` flag        |
//! | `cook`    | logger, flags, layered config, docs, execute       |
//! | `clean`   | typed confirmation, execute                        |
//! | `serve`   | flags, yes/no prompt with a skip condition         |
//! | `bake`    | deprecated (hidden, prints a notice)               |
//! | `plate`   | aliases, positional args                           |
//! | `version` | execute                                            |
//!
pub mod bake;
pub mod clean;
pub mod cook;
pub mod plate;
pub mod serve;
pub mod version;

use moult::{Command, Docs, Field, Flags, Result, TaggedStruct, WithDocs, WithFlags, WithSubCommands};

/// Flags owned by the root command.
#[derive(Debug, Clone, Default)]
pub struct GlobalFlags {
    pub json: bool,
}

impl TaggedStruct for GlobalFlags {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("json", &mut self.json)
            .long("json")
            .usage("machine-readable output")
            .persistent()]
    }
}

/// The `cookbook` root command.
#[derive(Debug, Default)]
pub struct Cookbook {
    flags: GlobalFlags,
}

impl Command for Cookbook {
    fn usage(&self) -> &str {
        "cookbook"
    }

    moult::capabilities!(flags, docs, subcommands);
}

impl WithFlags for Cookbook {
    fn flags(&mut self) -> Result<Flags<'_>> {
        Flags::build(&mut self.flags)
    }
}

impl WithDocs for Cookbook {
    fn docs(&self) -> Docs {
        Docs {
            short: "A small kitchen assembled from moult capabilities".to_string(),
            long: "Cook, clean, serve and plate. Every subcommand is a plain value; \
                   moult turns it into a command."
                .to_string(),
            example: "cookbook cook --heat-level 7\ncookbook clean --force".to_string(),
            beta: false,
        }
    }
}

impl WithSubCommands for Cookbook {
    fn sub_commands(&mut self) -> Vec<Box<dyn Command>> {
        vec![
            Box::new(cook::Cook::default()),
            Box::new(clean::Clean),
            Box::new(serve::Serve::default()),
            Box::new(bake::Bake),
            Box::new(plate::Plate::default()),
            Box::new(version::Version),
        ]
    }
}
