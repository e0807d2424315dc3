//! # Moult Flag Descriptors (`flags`)
//!
//! File: moult/src/flags/mod.rs
//!
//! ## Overview
//!
//! A command that exposes flags hands the engine a `Flags` registry: an
//! ordered list of `Flag` descriptors, each owning write access to one field
//! of the command's configuration struct. The registry is usually produced by
//! `Flags::build`, which walks a `TaggedStruct` and emits one descriptor per
//! tagged field, then adjusted with `set_default` for defaults that are only
//! known at runtime.
//!
//! ## Architecture
//!
//! - **`tagged`**: the field walk (`TaggedStruct`, `Field`, `Slot`).
//! - **`kind`**: the closed set of supported target types and the type-directed
//!   operations on them.
//! - **`registered`**: the owned, validated form of a descriptor attached to a
//!   built command.
//!
//! ## Build rules
//!
//! 1. Fields are visited in declaration order.
//! 2. A field with a `long` or `short` tag becomes one descriptor. Its boolean
//!    tags (`required`, `persistent`, `hidden`) must parse, otherwise the build
//!    fails naming the tag.
//! 3. An untagged embedded struct is walked recursively and its descriptors
//!    are spliced in at the position of the embedding field.
//! 4. Everything else is skipped, and so are fields whose `long` and `short`
//!    tags are both empty.
//!
//! ## Examples
//!
//! ```rust,ignore
//! fn flags(&mut self) -> Result<Flags<'_>> {
//!     let mut flags = Flags::build(&mut self.config)?;
//!     flags.set_default("heat-level", 5i64);
//!     Ok(flags)
//! }
//! ```
//!
pub mod kind;
pub mod registered;
pub mod tagged;

use crate::core::error::{MoultError, Result};
use crate::core::value::parse_bool;
use kind::FlagKind;
use std::any::Any;
use std::fmt;
use tagged::{
    Field, Slot, TaggedStruct, TAG_HIDDEN, TAG_LONG, TAG_PERSISTENT, TAG_REQUIRED, TAG_SHORT,
    TAG_USAGE,
};

/// Describes a single command-line flag.
pub struct Flag<'a> {
    /// Long name of the flag.
    pub long: String,
    /// Shorthand of the flag, exactly one character when set.
    pub short: String,
    /// Description shown in the help output.
    pub usage: String,
    pub required: bool,
    /// Propagates the flag to subcommands.
    pub persistent: bool,
    pub hidden: bool,
    /// Value used when the flag is not given. Must have the target's type.
    pub default: Option<Box<dyn Any>>,
    /// The field the parsed value is written to.
    pub target: &'a mut dyn Any,
}

impl<'a> Flag<'a> {
    /// Describes a flag named `long` that writes into `target`.
    ///
    /// ## Arguments
    ///
    /// * `long` - The long name. May be empty for a shorthand-only flag.
    /// * `target` - The field receiving the parsed value. Its type decides the
    ///   flag kind.
    pub fn new<T: Any>(long: impl Into<String>, target: &'a mut T) -> Self {
        Self {
            long: long.into(),
            short: String::new(),
            usage: String::new(),
            required: false,
            persistent: false,
            hidden: false,
            default: None,
            target,
        }
    }

    /// Sets the one-character shorthand.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Sets the help text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Marks the flag as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes the flag available to every subcommand.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Leaves the flag out of the help output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Sets an explicit default. Without one the target's current value is used.
    pub fn default_value<T: Any>(mut self, value: T) -> Self {
        self.default = Some(Box::new(value));
        self
    }

    /// Long name, or the shorthand for shorthand-only flags.
    pub fn name(&self) -> &str {
        if self.long.is_empty() {
            &self.short
        } else {
            &self.long
        }
    }

    /// Kind of the target, `None` for unsupported types.
    pub fn kind(&self) -> Option<FlagKind> {
        FlagKind::of(&*self.target)
    }

    fn from_field(field: Field<'a>) -> Result<Option<Self>> {
        let long = field.lookup(TAG_LONG).unwrap_or_default().to_string();
        let short = field.lookup(TAG_SHORT).unwrap_or_default().to_string();
        let usage = field.lookup(TAG_USAGE).unwrap_or_default().to_string();
        let required = bool_tag(&field, TAG_REQUIRED)?;
        let persistent = bool_tag(&field, TAG_PERSISTENT)?;
        let hidden = bool_tag(&field, TAG_HIDDEN)?;

        if long.is_empty() && short.is_empty() {
            return Ok(None);
        }

        let target = match field.into_parts().1 {
            Slot::Value(target) => target,
            Slot::Struct(_) | Slot::Optional(_) => {
                return Err(MoultError::UnsupportedFlagType {
                    flag: if long.is_empty() { short } else { long },
                }
                .into())
            }
        };

        Ok(Some(Self {
            long,
            short,
            usage,
            required,
            persistent,
            hidden,
            default: None,
            target,
        }))
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("usage", &self.usage)
            .field("required", &self.required)
            .field("persistent", &self.persistent)
            .field("hidden", &self.hidden)
            .field("has_default", &self.default.is_some())
            .field("kind", &self.kind())
            .finish()
    }
}

fn bool_tag(field: &Field<'_>, tag: &'static str) -> Result<bool> {
    match field.lookup(tag) {
        None => Ok(false),
        Some(value) => parse_bool(value).ok_or_else(|| {
            MoultError::InvalidTag {
                tag,
                value: value.to_string(),
            }
            .into()
        }),
    }
}

/// Ordered collection of flag descriptors.
#[derive(Debug, Default)]
pub struct Flags<'a> {
    items: Vec<Flag<'a>>,
}

impl<'a> Flags<'a> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds descriptors from the tagged fields of `cfg`. Every descriptor
    /// starts without a default.
    pub fn build(cfg: &'a mut dyn TaggedStruct) -> Result<Self> {
        let mut items = Vec::new();
        collect(cfg.fields(), &mut items)?;
        Ok(Self { items })
    }

    /// Returns the first flag with the given long name.
    pub fn get(&self, long: &str) -> Option<&Flag<'a>> {
        self.items.iter().find(|f| f.long == long)
    }

    /// Mutable access to the first flag with the given long name.
    pub fn get_mut(&mut self, long: &str) -> Option<&mut Flag<'a>> {
        self.items.iter_mut().find(|f| f.long == long)
    }

    /// Sets the default of the first flag with the given long name. Returns
    /// `false` when there is no such flag. The type is checked when the flag
    /// is registered on a command.
    pub fn set_default<T: Any>(&mut self, long: &str, value: T) -> bool {
        match self.get_mut(long) {
            Some(flag) => {
                flag.default = Some(Box::new(value));
                true
            }
            None => false,
        }
    }

    /// Appends a hand-written descriptor after the built ones.
    pub fn push(&mut self, flag: Flag<'a>) {
        self.items.push(flag);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag<'a>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for Flags<'a> {
    type Item = Flag<'a>;
    type IntoIter = std::vec::IntoIter<Flag<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> FromIterator<Flag<'a>> for Flags<'a> {
    fn from_iter<I: IntoIterator<Item = Flag<'a>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn collect<'a>(fields: Vec<Field<'a>>, out: &mut Vec<Flag<'a>>) -> Result<()> {
    for field in fields {
        if field.is_flag() {
            if let Some(flag) = Flag::from_field(field)? {
                out.push(flag);
            }
            continue;
        }
        // Only embedded structs are walked; optional ones never carry flags.
        if let (_, Slot::Struct(nested)) = field.into_parts() {
            collect(nested.fields(), out)?;
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct SharedFlags {
        verbose: bool,
        output: String,
    }

    impl TaggedStruct for SharedFlags {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::value("verbose", &mut self.verbose)
                    .long("verbose")
                    .short("v")
                    .persistent(),
                Field::value("output", &mut self.output).long("output"),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct Extra {
        timeout: Duration,
    }

    impl TaggedStruct for Extra {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::value("timeout", &mut self.timeout).long("timeout")]
        }
    }

    #[derive(Debug, Default)]
    struct Config {
        name: String,
        shared: SharedFlags,
        internal: u32,
        level: i64,
        extra: Option<Extra>,
        blank: String,
    }

    impl TaggedStruct for Config {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::value("name", &mut self.name)
                    .long("name")
                    .usage("who to greet")
                    .required(),
                Field::nested("shared", &mut self.shared),
                Field::value("internal", &mut self.internal),
                Field::value("level", &mut self.level).short("l").hidden(),
                Field::optional("extra", &mut self.extra),
                Field::value("blank", &mut self.blank).long("").short(""),
            ]
        }
    }

    #[test]
    fn test_build_keeps_declaration_order_and_splices_embedded() {
        let mut cfg = Config {
            extra: Some(Extra::default()),
            ..Config::default()
        };
        let flags = Flags::build(&mut cfg).unwrap();
        let names: Vec<&str> = flags.iter().map(Flag::name).collect();
        assert_eq!(names, vec!["name", "verbose", "output", "l"]);

        let name = flags.get("name").unwrap();
        assert!(name.required);
        assert_eq!(name.usage, "who to greet");
        assert!(name.default.is_none());

        let verbose = flags.get("verbose").unwrap();
        assert!(verbose.persistent);
        assert_eq!(verbose.short, "v");
        assert_eq!(verbose.kind(), Some(FlagKind::Bool));

        let level = flags.iter().find(|f| f.short == "l").unwrap();
        assert!(level.hidden);
        assert!(level.long.is_empty());
    }

    #[test]
    fn test_targets_write_through_to_fields() {
        let mut cfg = Config::default();
        {
            let flags = Flags::build(&mut cfg).unwrap();
            for flag in flags {
                if let Some(name) = flag.target.downcast_mut::<String>() {
                    *name = "chef".to_string();
                }
            }
        }
        assert_eq!(cfg.name, "chef");
        assert_eq!(cfg.shared.output, "chef");
    }

    #[test]
    fn test_invalid_boolean_tag_names_the_tag() {
        struct Broken {
            force: bool,
        }
        impl TaggedStruct for Broken {
            fn fields(&mut self) -> Vec<Field<'_>> {
                vec![Field::value("force", &mut self.force)
                    .long("force")
                    .tag(TAG_PERSISTENT, "sometimes")]
            }
        }

        let mut broken = Broken { force: false };
        let err = Flags::build(&mut broken).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error parsing tag \"persistent\": \"sometimes\" is not a valid boolean"
        );
    }

    #[test]
    fn test_registry_lookup_and_defaults() {
        let mut cfg = Config::default();
        let mut flags = Flags::build(&mut cfg).unwrap();

        assert!(flags.set_default("output", "out.txt".to_string()));
        assert!(!flags.set_default("missing", 1i64));
        let output = flags.get("output").unwrap();
        let default = output.default.as_ref().unwrap().downcast_ref::<String>();
        assert_eq!(default.map(String::as_str), Some("out.txt"));

        // Shorthand-only flags are not found by long name.
        assert!(flags.get("l").is_none());
        assert_eq!(flags.len(), 4);
        assert!(!flags.is_empty());
    }

    #[test]
    fn test_registry_first_match_wins() {
        let mut a = 1i64;
        let mut b = 2i64;
        let mut flags = Flags::new();
        flags.push(Flag::new("dup", &mut a).usage("first"));
        flags.push(Flag::new("dup", &mut b).usage("second"));
        assert_eq!(flags.get("dup").unwrap().usage, "first");
        assert!(flags.set_default("dup", 9i64));
        assert!(flags.iter().nth(1).unwrap().default.is_none());
    }
}
