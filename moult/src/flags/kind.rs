//! # Flag Value Kinds (`flags::kind`)
//!
//! File: moult/src/flags/kind.rs
//!
//! ## Overview
//!
//! Flag targets are type-erased (`&mut dyn Any`), so every operation that needs
//! the concrete type goes through `FlagKind`, a closed set of the supported
//! target types. Registering a flag picks the kind by probing the target;
//! everything afterwards (clap value parser, reading parsed matches, capturing
//! a default, writing a resolved value back) dispatches on the kind.
//!
//! ## Supported Types
//!
//! - Scalars: `String`, `PathBuf`, `bool`, `i8`..`i64`, `isize`, `u8`..`u64`,
//!   `usize`, `f32`, `f64`, `Duration`.
//! - Lists: `Vec<bool>`, `Vec<f32>`, `Vec<f64>`, `Vec<i32>`, `Vec<i64>`,
//!   `Vec<isize>`, `Vec<String>`.
//!
use crate::common::duration::parse_duration;
use crate::core::value::Value;
use clap::builder::ValueParser;
use clap::parser::MatchesError;
use clap::{value_parser, ArgMatches};
use std::any::{type_name, Any};
use std::path::PathBuf;
use std::time::Duration;

/// A type that can back a flag or a list flag element.
pub(crate) trait Scalar: Any + Clone + Default + Send + Sync {
    fn parser() -> ValueParser;
    fn to_value(&self) -> Value;
    fn from_value(value: &Value) -> Result<Self, String>;
}

impl Scalar for String {
    fn parser() -> ValueParser {
        value_parser!(String).into()
    }
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_text()
    }
}

impl Scalar for PathBuf {
    fn parser() -> ValueParser {
        value_parser!(PathBuf).into()
    }
    fn to_value(&self) -> Value {
        Value::Str(self.to_string_lossy().into_owned())
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_text().map(PathBuf::from)
    }
}

impl Scalar for bool {
    fn parser() -> ValueParser {
        value_parser!(bool).into()
    }
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_bool()
    }
}

impl Scalar for Duration {
    fn parser() -> ValueParser {
        ValueParser::new(parse_duration)
    }
    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_duration()
    }
}

macro_rules! integer_scalars {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            fn parser() -> ValueParser {
                value_parser!($ty).into()
            }
            fn to_value(&self) -> Value {
                // Values beyond i64 travel as text and parse back losslessly.
                i64::try_from(*self)
                    .map(Value::Int)
                    .unwrap_or_else(|_| Value::Str(self.to_string()))
            }
            fn from_value(value: &Value) -> Result<Self, String> {
                if let Value::Str(s) = value {
                    return s.trim().parse::<$ty>().map_err(|e| format!("{s:?}: {e}"));
                }
                let n = value.to_i64()?;
                <$ty>::try_from(n).map_err(|_| {
                    format!("{n} is out of range for {}", type_name::<$ty>())
                })
            }
        }
    )*};
}

integer_scalars!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Scalar for f32 {
    fn parser() -> ValueParser {
        value_parser!(f32).into()
    }
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_f64().map(|f| f as f32)
    }
}

impl Scalar for f64 {
    fn parser() -> ValueParser {
        value_parser!(f64).into()
    }
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
    fn from_value(value: &Value) -> Result<Self, String> {
        value.to_f64()
    }
}

fn capture_one<T: Scalar>(value: &dyn Any) -> Option<Value> {
    value.downcast_ref::<T>().map(T::to_value)
}

fn capture_many<T: Scalar>(value: &dyn Any) -> Option<Value> {
    value
        .downcast_ref::<Vec<T>>()
        .map(|items| Value::List(items.iter().map(T::to_value).collect()))
}

fn read_one<T: Scalar>(matches: &ArgMatches, id: &str) -> Result<Option<Value>, MatchesError> {
    Ok(matches.try_get_one::<T>(id)?.map(T::to_value))
}

fn read_many<T: Scalar>(matches: &ArgMatches, id: &str) -> Result<Option<Value>, MatchesError> {
    Ok(matches
        .try_get_many::<T>(id)?
        .map(|items| Value::List(items.map(T::to_value).collect())))
}

fn assign_one<T: Scalar>(target: &mut dyn Any, value: &Value) -> Result<(), String> {
    let slot = target
        .downcast_mut::<T>()
        .ok_or_else(|| format!("target is not a {}", type_name::<T>()))?;
    *slot = T::from_value(value)?;
    Ok(())
}

fn assign_many<T: Scalar>(target: &mut dyn Any, value: &Value) -> Result<(), String> {
    let slot = target
        .downcast_mut::<Vec<T>>()
        .ok_or_else(|| format!("target is not a {}", type_name::<Vec<T>>()))?;
    *slot = value
        .to_items()
        .iter()
        .map(T::from_value)
        .collect::<Result<Vec<T>, String>>()?;
    Ok(())
}

macro_rules! flag_kinds {
    (
        scalars { $($s:ident => $sty:ty),* $(,)? }
        lists { $($l:ident => $lty:ty),* $(,)? }
    ) => {
        /// The closed set of supported flag target types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FlagKind {
            $($s,)*
            $($l,)*
        }

        impl FlagKind {
            /// Detects the kind of a type-erased target.
            pub fn of(target: &dyn Any) -> Option<Self> {
                $(if target.is::<$sty>() {
                    return Some(Self::$s);
                })*
                $(if target.is::<Vec<$lty>>() {
                    return Some(Self::$l);
                })*
                None
            }

            pub fn is_list(self) -> bool {
                match self {
                    $(Self::$s => false,)*
                    $(Self::$l => true,)*
                }
            }

            /// Rust name of the target type, for diagnostics.
            pub fn type_name(self) -> &'static str {
                match self {
                    $(Self::$s => type_name::<$sty>(),)*
                    $(Self::$l => type_name::<Vec<$lty>>(),)*
                }
            }

            /// Parser for a single command-line value (one list element for
            /// list kinds).
            pub(crate) fn value_parser(self) -> ValueParser {
                match self {
                    $(Self::$s => <$sty as Scalar>::parser(),)*
                    $(Self::$l => <$lty as Scalar>::parser(),)*
                }
            }

            /// Zero value of the kind.
            pub(crate) fn zero(self) -> Value {
                match self {
                    $(Self::$s => <$sty as Scalar>::to_value(&<$sty>::default()),)*
                    $(Self::$l => Value::List(Vec::new()),)*
                }
            }

            /// Converts a typed value of this kind into a `Value`. `None` when
            /// the value has a different type.
            pub(crate) fn capture(self, value: &dyn Any) -> Option<Value> {
                match self {
                    $(Self::$s => capture_one::<$sty>(value),)*
                    $(Self::$l => capture_many::<$lty>(value),)*
                }
            }

            /// Reads the parsed value of argument `id`, if present.
            pub(crate) fn read(
                self,
                matches: &ArgMatches,
                id: &str,
            ) -> Result<Option<Value>, MatchesError> {
                match self {
                    $(Self::$s => read_one::<$sty>(matches, id),)*
                    $(Self::$l => read_many::<$lty>(matches, id),)*
                }
            }

            /// Writes `value` into `target`, coercing where sensible.
            pub(crate) fn assign(self, target: &mut dyn Any, value: &Value) -> Result<(), String> {
                match self {
                    $(Self::$s => assign_one::<$sty>(target, value),)*
                    $(Self::$l => assign_many::<$lty>(target, value),)*
                }
            }
        }
    };
}

flag_kinds! {
    scalars {
        Str => String,
        Path => PathBuf,
        Bool => bool,
        I8 => i8,
        I16 => i16,
        I32 => i32,
        I64 => i64,
        Isize => isize,
        U8 => u8,
        U16 => u16,
        U32 => u32,
        U64 => u64,
        Usize => usize,
        F32 => f32,
        F64 => f64,
        Duration => Duration,
    }
    lists {
        BoolList => bool,
        F32List => f32,
        F64List => f64,
        I32List => i32,
        I64List => i64,
        IsizeList => isize,
        StrList => String,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_kind_detection() {
        assert_eq!(FlagKind::of(&String::new()), Some(FlagKind::Str));
        assert_eq!(FlagKind::of(&0u16), Some(FlagKind::U16));
        assert_eq!(FlagKind::of(&Duration::ZERO), Some(FlagKind::Duration));
        assert_eq!(FlagKind::of(&Vec::<i64>::new()), Some(FlagKind::I64List));
        assert_eq!(FlagKind::of(&HashMap::<String, String>::new()), None);
        assert_eq!(FlagKind::of(&Vec::<u8>::new()), None);
        assert!(FlagKind::StrList.is_list());
        assert!(!FlagKind::Bool.is_list());
    }

    #[test]
    fn test_assign_coerces_strings() {
        let mut level = 0i32;
        FlagKind::I32
            .assign(&mut level, &Value::Str("33".into()))
            .unwrap();
        assert_eq!(level, 33);

        let mut names: Vec<String> = Vec::new();
        FlagKind::StrList
            .assign(&mut names, &Value::Str("salt,pepper".into()))
            .unwrap();
        assert_eq!(names, vec!["salt", "pepper"]);

        let mut timeout = Duration::ZERO;
        FlagKind::Duration
            .assign(&mut timeout, &Value::Str("90s".into()))
            .unwrap();
        assert_eq!(timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_assign_rejects_out_of_range_and_wrong_target() {
        let mut small = 0u8;
        assert!(FlagKind::U8.assign(&mut small, &Value::Int(300)).is_err());
        assert!(FlagKind::U8.assign(&mut small, &Value::Int(-1)).is_err());

        let mut text = String::new();
        assert!(FlagKind::Bool.assign(&mut text, &Value::Bool(true)).is_err());
    }

    #[test]
    fn test_large_unsigned_values_survive_round_trip() {
        let big = u64::MAX;
        let captured = FlagKind::U64.capture(&big).unwrap();
        let mut out = 0u64;
        FlagKind::U64.assign(&mut out, &captured).unwrap();
        assert_eq!(out, u64::MAX);
    }

    #[test]
    fn test_capture_checks_type() {
        assert_eq!(FlagKind::I64.capture(&5i64), Some(Value::Int(5)));
        assert_eq!(FlagKind::I64.capture(&5i32), None);
        assert_eq!(FlagKind::F32List.zero(), Value::List(Vec::new()));
        assert_eq!(FlagKind::Str.zero(), Value::Str(String::new()));
    }
}
