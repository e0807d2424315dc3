//! # Moult Layered Configuration
//!
//! File: moult/src/core/config.rs
//!
//! ## Overview
//!
//! This module resolves a command's configuration struct from four layers:
//! the defaults struct, a config file, environment variables and the parsed
//! command-line flags. It is what the configuration decorator runs as a
//! pre-run hook, but it does not depend on a command being executed and can be
//! called directly.
//!
//! ## Architecture
//!
//! Every field of the destination struct carrying a `long` or `short` tag is a
//! configuration key (the tag value, lowercased). For each key the value is
//! taken from the highest-precedence layer that sets it:
//!
//! 1. Flags the user explicitly supplied on the command line
//! 2. Environment variables named `{PREFIX}_{KEY}` (`.` and `-` become `_`)
//! 3. The config file
//! 4. The defaults struct
//! 5. The registered default of a flag that was not supplied
//!
//! Resolution proceeds in fixed steps:
//! - The destination and defaults must be the same struct type.
//! - Defaults are collected from the defaults struct, walking nested and
//!   present optional structs. List-typed and unsupported fields are not
//!   collected.
//! - `{PREFIX}_CONFIG_PATH` overrides the configured file path, and `~` is
//!   expanded. A missing file is tolerated; an unreadable or malformed one is
//!   fatal. `.toml` files are TOML, everything else is YAML.
//! - Each keyed field of the destination receives the resolved value. Keys
//!   no layer sets are left untouched.
//!
//! Because an unset flag still contributes its default as the lowest layer,
//! flags should be registered with the same defaults as the defaults struct.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let cfg = UserConfig::new("COOKBOOK", &mut self.config, CookingConfig::default())
//!     .with_path("~/.cookbook.yaml");
//! parse_config(cfg, &bound_flags, &ProcessEnv)?;
//! ```
//!
use crate::common::environment::{env_var_name, Environment};
use crate::core::error::{MoultError, Result};
use crate::core::value::{normalize_key, table_from_toml, table_from_yaml, Table, Value};
use crate::flags::kind::FlagKind;
use crate::flags::tagged::{Field, Slot, TaggedStruct};
use anyhow::Context;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// What a command hands to the resolver.
pub struct UserConfig<'a> {
    /// Prefix of the environment variables consulted, e.g. `COOKBOOK`.
    pub env_prefix: String,
    /// The struct the resolved configuration is written into.
    pub parsed: &'a mut dyn TaggedStruct,
    /// Default values, a struct of the same type as `parsed`.
    pub defaults: Box<dyn TaggedStruct>,
    /// Config file path. Empty means no file.
    pub path: PathBuf,
}

impl<'a> UserConfig<'a> {
    /// Resolves into `parsed`, falling back to `defaults`. No config file is read
    /// until a path is set.
    pub fn new<T: TaggedStruct>(env_prefix: impl Into<String>, parsed: &'a mut T, defaults: T) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            parsed,
            defaults: Box::new(defaults),
            path: PathBuf::new(),
        }
    }

    /// Sets the config file path. `~` is expanded at resolution time.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// A flag as seen by the resolver: its key, its current value (parsed or
/// default) and whether the user supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFlag {
    pub name: String,
    pub value: Value,
    pub explicit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Flag,
    Env,
    File,
    Default,
    FlagDefault,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Flag => "flag",
            Source::Env => "environment",
            Source::File => "config file",
            Source::Default => "defaults",
            Source::FlagDefault => "flag default",
        })
    }
}

/// The merged view of all layers.
struct Layers<'e> {
    prefix: String,
    flags: HashMap<String, &'e BoundFlag>,
    env: &'e dyn Environment,
    file: Table,
    defaults: Table,
}

impl Layers<'_> {
    fn lookup(&self, key: &str) -> Option<(Value, Source)> {
        let flag = self.flags.get(key);
        if let Some(flag) = flag.filter(|f| f.explicit) {
            return Some((flag.value.clone(), Source::Flag));
        }
        let raw = self.env.var(&env_var_name(&self.prefix, key));
        if let Some(raw) = raw.filter(|v| !v.is_empty()) {
            return Some((Value::Str(raw), Source::Env));
        }
        if let Some(value) = self.file.get(key) {
            return Some((value.clone(), Source::File));
        }
        if let Some(value) = self.defaults.get(key) {
            return Some((value.clone(), Source::Default));
        }
        flag.map(|f| (f.value.clone(), Source::FlagDefault))
    }
}

/// Resolves `cfg.parsed` from defaults, config file, environment and flags.
pub fn parse_config(mut cfg: UserConfig<'_>, flags: &[BoundFlag], env: &dyn Environment) -> Result<()> {
    if cfg.parsed.shape() != cfg.defaults.shape() {
        return Err(MoultError::Config(
            "parsed and defaults must be the same type".to_string(),
        )
        .into());
    }

    let mut defaults = Table::new();
    collect_defaults(cfg.defaults.fields(), &mut defaults);

    let path = effective_path(&cfg.env_prefix, &cfg.path, env);
    let file = match path {
        Some(path) => load_config_file(&path).context("error parsing config")?,
        None => Table::new(),
    };

    let layers = Layers {
        prefix: cfg.env_prefix.clone(),
        flags: flags
            .iter()
            .map(|f| (normalize_key(&f.name), f))
            .collect(),
        env,
        file,
        defaults,
    };
    decode(cfg.parsed.fields(), &layers)
}

/// Loads a config file into a flat table. A missing file yields an empty
/// table.
pub fn load_config_file(path: &Path) -> Result<Table> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Config file {} not found, continuing without it.", path.display());
            return Ok(Table::new());
        }
        Err(e) => {
            return Err(MoultError::ConfigFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into())
        }
    };

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let table = if is_toml {
        table_from_toml(&content)
    } else {
        table_from_yaml(&content)
    }
    .map_err(|reason| MoultError::ConfigFile {
        path: path.display().to_string(),
        reason,
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(table)
}

fn effective_path(prefix: &str, configured: &Path, env: &dyn Environment) -> Option<PathBuf> {
    let override_var = env_var_name(prefix, "config_path");
    let raw = match env.var(&override_var).filter(|p| !p.is_empty()) {
        Some(path) => {
            debug!("Using config path from {}: {}", override_var, path);
            path
        }
        None => configured.to_string_lossy().into_owned(),
    };
    if raw.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(&raw).into_owned()))
}

fn collect_defaults(fields: Vec<Field<'_>>, out: &mut Table) {
    for field in fields {
        let key = normalize_key(field.key());
        match field.into_parts().1 {
            Slot::Struct(nested) => collect_defaults(nested.fields(), out),
            Slot::Optional(Some(nested)) => collect_defaults(nested.fields(), out),
            Slot::Optional(None) => {}
            Slot::Value(_) if key.is_empty() => {}
            Slot::Value(value) => match FlagKind::of(&*value) {
                Some(kind) if !kind.is_list() => {
                    if let Some(v) = kind.capture(&*value) {
                        out.insert(key, v);
                    }
                }
                _ => trace!("Skipping default for '{}': unsupported type", key),
            },
        }
    }
}

fn decode(fields: Vec<Field<'_>>, layers: &Layers<'_>) -> Result<()> {
    for field in fields {
        let key = normalize_key(field.key());
        match field.into_parts().1 {
            Slot::Struct(nested) => decode(nested.fields(), layers)?,
            Slot::Optional(Some(nested)) => decode(nested.fields(), layers)?,
            Slot::Optional(None) => {}
            Slot::Value(_) if key.is_empty() => {}
            Slot::Value(target) => {
                let Some((value, source)) = layers.lookup(&key) else {
                    continue;
                };
                let kind = FlagKind::of(&*target).ok_or_else(|| MoultError::Decode {
                    key: key.clone(),
                    reason: "unsupported field type".to_string(),
                })?;
                kind.assign(target, &value)
                    .map_err(|reason| MoultError::Decode {
                        key: key.clone(),
                        reason,
                    })?;
                debug!("Config key '{}' = {} (from {})", key, value, source);
            }
        }
    }
    Ok(())
}
