//! # Built Commands (`engine::built`)
//!
//! File: moult/src/engine/built.rs
//!
//! ## Overview
//!
//! Decorators never talk to clap directly. They mutate a `CommandDef`, a
//! plain description of the command (names, docs, flags, hooks, children),
//! and the engine pairs the finished definition with the command value into a
//! `BuiltCommand`. Only when a built command is executed is the definition
//! tree rendered into a `clap::Command` and the arguments parsed.
//!
//! ## Execution
//!
//! 1. The `clap::Command` tree is rendered and the arguments are parsed.
//!    `--help` and `--version` output goes to the console.
//! 2. Starting at the root, every command on the path to the selected one
//!    writes its parsed flag values (or registered defaults) into its flag
//!    targets.
//! 3. Persistent flags are handed down, so hooks of the selected command see
//!    them next to its own flags.
//! 4. A selected command without run hooks prints its help. Otherwise its
//!    pre-run hooks run, then its run hooks, in registration order; the first
//!    failing hook stops the invocation.
//!
use crate::common::console::Console;
use crate::common::context::Context;
use crate::core::error::{exit_code, MoultError, Result};
use crate::core::value::Value;
use crate::engine::command::Command;
use crate::flags::registered::RegisteredFlag;
use anyhow::anyhow;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches};
use std::ffi::OsString;
use std::fmt;
use tracing::{debug, trace};

/// Argument id under which positional arguments are collected.
pub(crate) const ARGS_ID: &str = "moult-positional-args";

/// A pre-run or run hook.
pub type Hook = Box<dyn Fn(&mut Invocation<'_>) -> Result<()>>;

/// Everything a hook can look at while the selected command runs.
pub struct Invocation<'a> {
    /// The command value being executed.
    pub command: &'a mut dyn Command,
    pub matches: &'a ArgMatches,
    /// Positional arguments (empty unless the command accepts them).
    pub args: &'a [String],
    /// Command names from the root to the running command.
    pub path: &'a [String],
    /// Flags visible to the command: inherited persistent flags, then its own.
    pub flags: &'a [RegisteredFlag],
    pub context: &'a Context,
    pub console: &'a mut Console,
}

impl Invocation<'_> {
    /// Looks up a visible flag by name.
    pub fn flag(&self, name: &str) -> Option<&RegisteredFlag> {
        self.flags.iter().find(|f| f.name() == name)
    }

    /// Whether the named flag exists and was given on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.flag(name).is_some_and(|f| f.is_set(self.matches))
    }

    /// Current value of the named flag: parsed, or its registered default.
    pub fn flag_value(&self, name: &str) -> Result<Option<Value>> {
        match self.flag(name) {
            Some(flag) => Ok(Some(flag.value(self.matches)?)),
            None => Ok(None),
        }
    }
}

/// The command object decorators build up.
pub struct CommandDef {
    /// First word of the usage line.
    pub name: String,
    pub usage: String,
    pub aliases: Vec<String>,
    pub short: String,
    pub long: String,
    pub example: String,
    pub hidden: bool,
    /// Whether positional arguments are accepted.
    pub accepts_args: bool,
    flags: Vec<RegisteredFlag>,
    pre_run: Vec<Hook>,
    run: Vec<Hook>,
    children: Vec<BuiltCommand>,
}

impl CommandDef {
    /// Starts an empty definition from a usage line such as `"plate [dish...]"`.
    /// The first word becomes the command name.
    pub fn new(usage: impl Into<String>) -> Self {
        let usage = usage.into();
        let name = usage.split_whitespace().next().unwrap_or_default().to_string();
        Self {
            name,
            usage,
            aliases: Vec::new(),
            short: String::new(),
            long: String::new(),
            example: String::new(),
            hidden: false,
            accepts_args: false,
            flags: Vec::new(),
            pre_run: Vec::new(),
            run: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Registered flags in registration order.
    pub fn flags(&self) -> &[RegisteredFlag] {
        &self.flags
    }

    /// Looks up a registered flag by name.
    pub fn flag(&self, name: &str) -> Option<&RegisteredFlag> {
        self.flags.iter().find(|f| f.name() == name)
    }

    /// Whether a flag called `name` is registered.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flag(name).is_some()
    }

    /// Whether any registered flag owns `short`.
    pub fn has_shorthand(&self, short: char) -> bool {
        self.flags.iter().any(|f| f.short == Some(short))
    }

    /// Registers a flag. Names and shorthands must be unique per command.
    pub fn add_flag(&mut self, flag: RegisteredFlag) -> Result<()> {
        let clashes = self.has_flag(&flag.name())
            || flag.short.is_some_and(|s| self.has_shorthand(s));
        if clashes {
            return Err(MoultError::DuplicateFlag {
                flag: flag.name(),
                command: self.name.clone(),
            }
            .into());
        }
        trace!("Registered flag '{}' on '{}'", flag.name(), self.name);
        self.flags.push(flag);
        Ok(())
    }

    /// Appends a hook that runs before the run hooks.
    pub fn add_pre_run(&mut self, hook: impl Fn(&mut Invocation<'_>) -> Result<()> + 'static) {
        self.pre_run.push(Box::new(hook));
    }

    /// Appends a run hook.
    pub fn add_run(&mut self, hook: impl Fn(&mut Invocation<'_>) -> Result<()> + 'static) {
        self.run.push(Box::new(hook));
    }

    /// Number of pre-run hooks.
    pub fn pre_run_hooks(&self) -> usize {
        self.pre_run.len()
    }

    /// Number of run hooks.
    pub fn run_hooks(&self) -> usize {
        self.run.len()
    }

    /// Whether running the command does anything beyond printing help.
    pub fn is_runnable(&self) -> bool {
        !self.run.is_empty()
    }

    /// Appends a subcommand. Children keep the order they were added in.
    pub fn add_child(&mut self, child: BuiltCommand) {
        self.children.push(child);
    }

    /// Subcommands in declaration order.
    pub fn children(&self) -> &[BuiltCommand] {
        &self.children
    }

    /// Renders the command tree as a `clap::Command`.
    pub fn to_clap(&self) -> clap::Command {
        self.render("")
    }

    fn render(&self, parent_path: &str) -> clap::Command {
        let path = if parent_path.is_empty() {
            self.name.clone()
        } else {
            format!("{parent_path} {}", self.name)
        };

        let mut cmd = clap::Command::new(self.name.clone())
            .aliases(self.aliases.clone())
            .hide(self.hidden)
            .args(self.flags.iter().map(RegisteredFlag::to_arg));

        if !self.short.is_empty() {
            cmd = cmd.about(self.short.clone());
        }
        if !self.long.is_empty() {
            cmd = cmd.long_about(self.long.clone());
        }
        if !self.example.is_empty() {
            cmd = cmd.after_help(format!("Examples:\n{}", self.example));
        }
        if self.usage.split_whitespace().nth(1).is_some() {
            let rest = self.usage.trim_start()[self.name.len()..].trim_start();
            cmd = cmd.override_usage(format!("{path} {rest}"));
        }
        if self.accepts_args {
            cmd = cmd.arg(
                Arg::new(ARGS_ID)
                    .value_name("ARGS")
                    .num_args(0..)
                    .action(ArgAction::Append),
            );
        }
        if !self.children.is_empty() {
            cmd = cmd.subcommands(self.children.iter().map(|c| c.def.render(&path)));
            if self.accepts_args {
                cmd = cmd.args_conflicts_with_subcommands(true);
            }
        }
        cmd
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("aliases", &self.aliases)
            .field("hidden", &self.hidden)
            .field("flags", &self.flags)
            .field("pre_run", &self.pre_run.len())
            .field("run", &self.run.len())
            .field("children", &self.children)
            .finish()
    }
}

/// A command definition paired with the command value it was built from.
pub struct BuiltCommand {
    def: CommandDef,
    value: Box<dyn Command>,
}

impl BuiltCommand {
    pub(crate) fn new(def: CommandDef, value: Box<dyn Command>) -> Self {
        Self { def, value }
    }

    /// The definition the decorators produced.
    pub fn def(&self) -> &CommandDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn command(&self) -> &dyn Command {
        self.value.as_ref()
    }

    /// The command value, mutable for inspection after a run.
    pub fn command_mut(&mut self) -> &mut dyn Command {
        self.value.as_mut()
    }

    /// Finds a direct child by name or alias.
    pub fn child(&self, name: &str) -> Option<&BuiltCommand> {
        self.def
            .children
            .iter()
            .find(|c| c.def.name == name || c.def.aliases.iter().any(|a| a == name))
    }

    pub fn to_clap(&self) -> clap::Command {
        self.def.to_clap()
    }

    /// Runs the command with the process arguments and standard streams.
    pub fn execute(&mut self) -> Result<()> {
        self.execute_with(std::env::args_os(), &Context::new(), &mut Console::stdio())
    }

    /// Runs the command with the given arguments (the first one is the
    /// program name), context and console.
    pub fn execute_with<I, T>(&mut self, argv: I, ctx: &Context, console: &mut Console) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cli = self.to_clap();
        let matches = match cli.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                console.stdout(&e.render().to_string());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        self.dispatch(&mut cli, &matches, Vec::new(), &[], ctx, console)
    }

    /// Runs the command with the process arguments, then terminates the
    /// process with the resulting exit status. Ctrl-C cancels the context.
    pub fn run_or_exit(mut self) -> ! {
        let ctx = Context::new();
        if let Err(e) = ctx.cancel_on_interrupt() {
            debug!("{:#}", e);
        }
        let mut console = Console::stdio();
        let result = self.execute_with(std::env::args_os(), &ctx, &mut console);
        let err = match result {
            Ok(()) => std::process::exit(0),
            Err(err) => err,
        };
        if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        // A declined prompt has already told the user why.
        if !matches!(err.downcast_ref::<MoultError>(), Some(MoultError::Declined(_))) {
            console.stderr(&format!("Error: {:#}\n", err));
        }
        std::process::exit(exit_code(&err))
    }

    fn dispatch(
        &mut self,
        cli: &mut clap::Command,
        matches: &ArgMatches,
        mut path: Vec<String>,
        inherited: &[RegisteredFlag],
        ctx: &Context,
        console: &mut Console,
    ) -> Result<()> {
        path.push(self.def.name.clone());
        self.bind_flags(matches)?;

        let mut visible = inherited.to_vec();
        visible.extend(self.def.flags.iter().cloned());

        if let Some((name, sub_matches)) = matches.subcommand() {
            let persistent: Vec<RegisteredFlag> =
                visible.iter().filter(|f| f.persistent).cloned().collect();
            let child = self
                .def
                .children
                .iter_mut()
                .find(|c| c.def.name == name)
                .ok_or_else(|| anyhow!("unknown subcommand {name:?}"))?;
            let sub_cli = cli
                .find_subcommand_mut(name)
                .ok_or_else(|| anyhow!("unknown subcommand {name:?}"))?;
            return child.dispatch(sub_cli, sub_matches, path, &persistent, ctx, console);
        }

        check_required(&visible, matches)?;

        let help = cli.render_help().to_string();
        if !self.def.is_runnable() {
            console.stdout(&help);
            return Ok(());
        }

        let args: Vec<String> = if self.def.accepts_args {
            matches
                .get_many::<String>(ARGS_ID)
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        let ctx = ctx.for_command(path.clone(), help);
        debug!("Running '{}'", path.join(" "));

        let mut inv = Invocation {
            command: self.value.as_mut(),
            matches,
            args: &args,
            path: &path,
            flags: &visible,
            context: &ctx,
            console,
        };
        for hook in &self.def.pre_run {
            hook(&mut inv)?;
        }
        for hook in &self.def.run {
            hook(&mut inv)?;
        }
        Ok(())
    }

    /// Writes the parsed value (or registered default) of each of this
    /// command's flags into the flag's target.
    fn bind_flags(&mut self, matches: &ArgMatches) -> Result<()> {
        if self.def.flags.is_empty() {
            return Ok(());
        }
        let Some(provider) = self.value.as_flags() else {
            return Ok(());
        };
        for flag in provider.flags()? {
            let name = flag.name().to_string();
            let Some(registered) = self.def.flags.iter().find(|f| f.name() == name) else {
                continue;
            };
            let value = registered.value(matches)?;
            registered
                .kind
                .assign(flag.target, &value)
                .map_err(|reason| MoultError::FlagBinding { flag: name, reason })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BuiltCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltCommand")
            .field("def", &self.def)
            .finish_non_exhaustive()
    }
}

/// clap cannot require global flags, so persistent required flags are
/// checked once the selected command is known.
fn check_required(flags: &[RegisteredFlag], matches: &ArgMatches) -> Result<()> {
    let missing: Vec<String> = flags
        .iter()
        .filter(|f| f.required && f.persistent && !f.is_set(matches))
        .map(|f| format!("{:?}", f.name()))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MoultError::MissingRequired(missing.join(", ")).into())
    }
}
