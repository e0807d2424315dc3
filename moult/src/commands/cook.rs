//! # Cook Command
//!
//! File: moult/src/commands/cook.rs
//!
//! ## Overview
//!
//! Shows flags and layered configuration working on the same struct. Every
//! field of `CookingConfig` is both a flag and a configuration key; the value
//! that reaches `execute` comes from, in order of precedence, the command
//! line, `COOKBOOK_*` environment variables, the config file
//! (`~/.cookbook.yaml`, or `COOKBOOK_CONFIG_PATH`) and the defaults.
//!
//! ## Examples
//!
//! ```bash
//! cookbook cook --heat-level 7 --spice salt,pepper
//! COOKBOOK_HEAT_LEVEL=9 cookbook cook
//! ```
//!
use moult::common::duration::format_duration;
use moult::{
    Command, Context, Docs, Field, Flags, Result, TaggedStruct, UserConfig, WithConfig, WithDocs,
    WithExecute, WithFlags, WithLogger,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Dispatch};

/// Flags shared by every command that works in the kitchen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitchenFlags {
    pub chef: String,
    pub dry_run: bool,
}

impl TaggedStruct for KitchenFlags {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("chef", &mut self.chef)
                .long("chef")
                .short("c")
                .usage("who is cooking"),
            Field::value("dry_run", &mut self.dry_run)
                .long("dry-run")
                .usage("describe the dish without cooking it"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookingConfig {
    pub heat_level: i64,
    pub timer: Duration,
    pub spices: Vec<String>,
    pub kitchen: KitchenFlags,
}

impl CookingConfig {
    pub fn defaults() -> Self {
        Self {
            heat_level: 5,
            timer: Duration::from_secs(600),
            spices: Vec::new(),
            kitchen: KitchenFlags {
                chef: "anonymous".to_string(),
                dry_run: false,
            },
        }
    }
}

impl TaggedStruct for CookingConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("heat_level", &mut self.heat_level)
                .long("heat-level")
                .short("l")
                .usage("how hot the stove is"),
            Field::value("timer", &mut self.timer)
                .long("timer")
                .usage("how long to cook"),
            Field::value("spices", &mut self.spices)
                .long("spice")
                .usage("spices to add"),
            Field::nested("kitchen", &mut self.kitchen),
        ]
    }
}

#[derive(Debug, Default)]
pub struct Cook {
    config: CookingConfig,
    logger: Option<Dispatch>,
}

impl Command for Cook {
    fn usage(&self) -> &str {
        "cook"
    }

    moult::capabilities!(logger, flags, config, docs, execute);
}

impl WithLogger for Cook {
    fn logger(&mut self, dispatch: Dispatch) {
        self.logger = Some(dispatch);
    }
}

impl WithFlags for Cook {
    fn flags(&mut self) -> Result<Flags<'_>> {
        let defaults = CookingConfig::defaults();
        let mut flags = Flags::build(&mut self.config)?;
        flags.set_default("heat-level", defaults.heat_level);
        flags.set_default("timer", defaults.timer);
        flags.set_default("chef", defaults.kitchen.chef);
        Ok(flags)
    }
}

impl WithConfig for Cook {
    fn config(&mut self) -> UserConfig<'_> {
        let path = dirs::home_dir()
            .map(|home| home.join(".cookbook.yaml"))
            .unwrap_or_else(|| PathBuf::from("~/.cookbook.yaml"));
        UserConfig::new("COOKBOOK", &mut self.config, CookingConfig::defaults()).with_path(path)
    }
}

impl WithDocs for Cook {
    fn docs(&self) -> Docs {
        Docs {
            short: "Cook a dish".to_string(),
            long: "Cooks a dish using settings from flags, COOKBOOK_* environment \
                   variables, ~/.cookbook.yaml and built-in defaults."
                .to_string(),
            example: "cookbook cook -l 7 --timer 15m --spice salt,pepper".to_string(),
            beta: false,
        }
    }
}

impl WithExecute for Cook {
    fn execute(&mut self, _ctx: &Context) -> Result<()> {
        let cfg = &self.config;
        if let Some(dispatch) = &self.logger {
            tracing::dispatcher::with_default(dispatch, || {
                info!("Cooking with {:?}", cfg);
            });
        }
        let verb = if cfg.kitchen.dry_run {
            "would cook"
        } else {
            "cooks"
        };
        println!(
            "{} {} at heat level {} for {} with spices [{}]",
            cfg.kitchen.chef,
            verb,
            cfg.heat_level,
            format_duration(cfg.timer),
            cfg.spices.join(", ")
        );
        Ok(())
    }
}
