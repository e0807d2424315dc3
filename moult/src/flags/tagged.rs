//! # Tagged Structs (`flags::tagged`)
//!
//! File: moult/src/flags/tagged.rs
//!
//! ## Overview
//!
//! Both the flag descriptor builder and the configuration resolver need to walk
//! a configuration struct field by field, in declaration order, reading a small
//! tag vocabulary attached to each field and writing values back into it. The
//! `TaggedStruct` trait is that walk: an implementation lists its fields as
//! `Field`s, each pointing at the live field and carrying its tags.
//!
//! ## Tag vocabulary
//!
//! | tag          | meaning                                            |
//! |--------------|----------------------------------------------------|
//! | `long`       | long flag name and configuration key               |
//! | `short`      | one-character shorthand (key when `long` is unset) |
//! | `usage`      | help text                                          |
//! | `required`   | boolean, flag must be supplied                     |
//! | `persistent` | boolean, flag is inherited by subcommands          |
//! | `hidden`     | boolean, flag is left out of help output           |
//!
//! A field without `long` and `short` never becomes a flag, but a nested
//! struct field without them is walked recursively, which is how a shared
//! group of flags can be embedded into several commands.
//!
//! ## Examples
//!
//! ```rust,ignore
//! #[derive(Debug, Default, Clone)]
//! struct CookingConfig {
//!     heat_level: i64,
//!     kitchen: KitchenFlags,
//! }
//!
//! impl TaggedStruct for CookingConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("heat_level", &mut self.heat_level)
//!                 .long("heat-level")
//!                 .short("l")
//!                 .usage("sets the heat level"),
//!             Field::nested("kitchen", &mut self.kitchen),
//!         ]
//!     }
//! }
//! ```
//!
use std::any::{Any, TypeId};

pub const TAG_LONG: &str = "long";
pub const TAG_SHORT: &str = "short";
pub const TAG_USAGE: &str = "usage";
pub const TAG_REQUIRED: &str = "required";
pub const TAG_PERSISTENT: &str = "persistent";
pub const TAG_HIDDEN: &str = "hidden";

/// A struct whose fields can be enumerated with their tags.
pub trait TaggedStruct: Any {
    /// Returns the fields in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Identifies the concrete struct type behind a trait object. Two values
    /// have the same shape when their shapes are equal.
    fn shape(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Where a field's value lives.
pub enum Slot<'a> {
    /// A plain value, written through type-directed downcasting.
    Value(&'a mut dyn Any),
    /// An embedded struct.
    Struct(&'a mut dyn TaggedStruct),
    /// An optional struct; `None` is skipped.
    Optional(Option<&'a mut dyn TaggedStruct>),
}

/// One field of a tagged struct.
pub struct Field<'a> {
    name: &'static str,
    tags: Vec<(&'static str, String)>,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// A leaf field.
    pub fn value<T: Any>(name: &'static str, value: &'a mut T) -> Self {
        Self::with_slot(name, Slot::Value(value))
    }

    /// An embedded struct field.
    pub fn nested<T: TaggedStruct>(name: &'static str, value: &'a mut T) -> Self {
        Self::with_slot(name, Slot::Struct(value))
    }

    /// An optional struct field.
    pub fn optional<T: TaggedStruct>(name: &'static str, value: &'a mut Option<T>) -> Self {
        let inner = value.as_mut().map(|v| v as &mut dyn TaggedStruct);
        Self::with_slot(name, Slot::Optional(inner))
    }

    fn with_slot(name: &'static str, slot: Slot<'a>) -> Self {
        Self {
            name,
            tags: Vec::new(),
            slot,
        }
    }

    /// Attaches a raw tag. Later tags with the same key are ignored by
    /// lookups.
    pub fn tag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.tags.push((key, value.into()));
        self
    }

    /// Tags the field with a long flag name, which is also its config key.
    pub fn long(self, name: impl Into<String>) -> Self {
        self.tag(TAG_LONG, name)
    }

    /// Tags the field with a one-character shorthand.
    pub fn short(self, name: impl Into<String>) -> Self {
        self.tag(TAG_SHORT, name)
    }

    /// Tags the field with help text.
    pub fn usage(self, text: impl Into<String>) -> Self {
        self.tag(TAG_USAGE, text)
    }

    /// Marks the field's flag as mandatory.
    pub fn required(self) -> Self {
        self.tag(TAG_REQUIRED, "true")
    }

    /// Propagates the field's flag to subcommands.
    pub fn persistent(self) -> Self {
        self.tag(TAG_PERSISTENT, "true")
    }

    /// Hides the field's flag from help.
    pub fn hidden(self) -> Self {
        self.tag(TAG_HIDDEN, "true")
    }

    /// The Rust field name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a tag; the first occurrence wins.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a tag with `key` is attached.
    pub fn has_tag(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Whether the field carries a `long` or `short` tag.
    pub fn is_flag(&self) -> bool {
        self.has_tag(TAG_LONG) || self.has_tag(TAG_SHORT)
    }

    /// Configuration key derived from the tags: `long`, falling back to
    /// `short`. Empty when neither is set.
    pub fn key(&self) -> &str {
        match self.lookup(TAG_LONG) {
            Some(long) if !long.is_empty() => long,
            _ => self.lookup(TAG_SHORT).unwrap_or_default(),
        }
    }

    pub fn slot(&mut self) -> &mut Slot<'a> {
        &mut self.slot
    }

    pub fn into_parts(self) -> (Vec<(&'static str, String)>, Slot<'a>) {
        (self.tags, self.slot)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Inner {
        port: u16,
    }

    impl TaggedStruct for Inner {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::value("port", &mut self.port).long("port")]
        }
    }

    #[derive(Default)]
    struct Outer {
        inner: Inner,
    }

    impl TaggedStruct for Outer {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::nested("inner", &mut self.inner)]
        }
    }

    #[test]
    fn test_key_prefers_long_then_short() {
        let mut n = 0i64;
        let field = Field::value("n", &mut n).short("n").long("count");
        assert_eq!(field.key(), "count");
        assert!(field.is_flag());

        let field = Field::value("n", &mut n).long("").short("n");
        assert_eq!(field.key(), "n");

        let field = Field::value("n", &mut n).usage("no names");
        assert_eq!(field.key(), "");
        assert!(!field.is_flag());
    }

    #[test]
    fn test_first_tag_wins() {
        let mut n = 0i64;
        let field = Field::value("n", &mut n).long("first").long("second");
        assert_eq!(field.lookup(TAG_LONG), Some("first"));
        assert!(!field.has_tag(TAG_HIDDEN));
    }

    #[test]
    fn test_slots_write_through() {
        let mut outer = Outer::default();
        for mut field in outer.fields() {
            if let Slot::Struct(inner) = field.slot() {
                for mut leaf in inner.fields() {
                    if let Slot::Value(port) = leaf.slot() {
                        if let Some(port) = port.downcast_mut::<u16>() {
                            *port = 8080;
                        }
                    }
                }
            }
        }
        assert_eq!(outer.inner.port, 8080);
    }

    #[test]
    fn test_shape_sees_through_trait_objects() {
        let outer: Box<dyn TaggedStruct> = Box::new(Outer::default());
        let inner: Box<dyn TaggedStruct> = Box::new(Inner::default());
        assert_eq!(outer.shape(), TypeId::of::<Outer>());
        assert_ne!(outer.shape(), inner.shape());
    }

    #[test]
    fn test_optional_none_has_no_target() {
        let mut missing: Option<Inner> = None;
        let mut field = Field::optional("missing", &mut missing);
        assert!(matches!(field.slot(), Slot::Optional(None)));
    }
}
