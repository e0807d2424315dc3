//! # Moult Dynamic Values
//!
//! File: moult/src/core/value.rs
//!
//! ## Overview
//!
//! Flags, default structs, environment variables and config files all speak a
//! different dialect: typed Rust values, strings, TOML and YAML documents. The
//! layered resolver needs one currency to compare and merge them, which is the
//! `Value` enum defined here.
//!
//! Config documents are deserialized straight into a flat `Table` whose keys
//! are the dotted, lowercased paths of every leaf (`server: {port: 80}` becomes
//! `server.port = 80`). Decoding a `Value` back into a typed field is lenient:
//! strings are parsed into numbers, booleans, durations and comma separated
//! lists, because environment variables only ever carry strings.
//!
use crate::common::duration::{format_duration, parse_duration};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// A dynamically typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Duration(Duration),
    List(Vec<Value>),
}

/// Flat key/value view of one configuration layer.
pub type Table = BTreeMap<String, Value>;

impl Value {
    /// Short name of the variant, used in conversion errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::List(_) => "list",
        }
    }

    /// Whether the value is the zero value of its type.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Duration(d) => d.is_zero(),
            Value::List(items) => items.is_empty(),
        }
    }

    pub fn to_bool(&self) -> Result<bool, String> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(*n != 0),
            Value::Str(s) => parse_bool(s.trim()).ok_or_else(|| format!("{s:?} is not a valid boolean")),
            other => Err(format!("cannot convert {} to bool", other.kind_name())),
        }
    }

    pub fn to_i64(&self) -> Result<i64, String> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(*f as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Str(s) => s.trim().parse().map_err(|e| format!("{s:?}: {e}")),
            other => Err(format!("cannot convert {} to integer", other.kind_name())),
        }
    }

    pub fn to_f64(&self) -> Result<f64, String> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(n) => Ok(*n as f64),
            Value::Str(s) => s.trim().parse().map_err(|e| format!("{s:?}: {e}")),
            other => Err(format!("cannot convert {} to float", other.kind_name())),
        }
    }

    pub fn to_duration(&self) -> Result<Duration, String> {
        match self {
            Value::Duration(d) => Ok(*d),
            // Bare integers count nanoseconds.
            Value::Int(n) => u64::try_from(*n)
                .map(Duration::from_nanos)
                .map_err(|_| format!("negative duration {n}")),
            Value::Str(s) => parse_duration(s.trim()),
            other => Err(format!("cannot convert {} to duration", other.kind_name())),
        }
    }

    /// Renders scalars as text; lists are rejected.
    pub fn to_text(&self) -> Result<String, String> {
        match self {
            Value::List(_) => Err("cannot convert list to string".to_string()),
            other => Ok(other.to_string()),
        }
    }

    /// Splits a value into list items: lists as-is, strings on commas, any
    /// other scalar as a single item.
    pub fn to_items(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.clone(),
            Value::Str(s) if s.trim().is_empty() => Vec::new(),
            Value::Str(s) => s.split(',').map(|part| Value::Str(part.trim().to_string())).collect(),
            scalar => vec![scalar.clone()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(","))
            }
        }
    }
}

/// Parses the conventional boolean spellings used by tags and environment
/// variables.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Lowercases a key and trims surrounding whitespace.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

// --- Config document decoding ---

/// A parsed config document node before flattening.
enum Node {
    Null,
    Leaf(Value),
    Map(Vec<(String, Node)>),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Leaf(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Leaf(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Leaf(
            i64::try_from(v).map(Value::Int).unwrap_or_else(|_| Value::Str(v.to_string())),
        ))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Leaf(Value::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Leaf(Value::Str(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Leaf(Value::Str(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::new();
        while let Some(node) = seq.next_element::<Node>()? {
            match node {
                Node::Null => {}
                Node::Leaf(value) => items.push(value),
                Node::Map(_) => {
                    return Err(de::Error::custom("tables nested inside lists are not supported"))
                }
            }
        }
        Ok(Node::Leaf(Value::List(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, node)) = map.next_entry::<String, Node>()? {
            entries.push((key, node));
        }
        Ok(Node::Map(entries))
    }
}

fn flatten(prefix: &str, node: Node, out: &mut Table) {
    match node {
        Node::Null => {}
        Node::Leaf(value) => {
            out.insert(normalize_key(prefix), value);
        }
        Node::Map(entries) => {
            for (key, child) in entries {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
    }
}

/// Decodes a TOML document into a flat table.
pub fn table_from_toml(content: &str) -> Result<Table, String> {
    let node: Node = toml::from_str(content).map_err(|e| e.to_string())?;
    into_table(node)
}

/// Decodes a YAML document into a flat table. An empty document is an empty
/// table.
pub fn table_from_yaml(content: &str) -> Result<Table, String> {
    if content.trim().is_empty() {
        return Ok(Table::new());
    }
    let node: Node = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    into_table(node)
}

fn into_table(node: Node) -> Result<Table, String> {
    match node {
        Node::Null => Ok(Table::new()),
        Node::Leaf(value) => Err(format!(
            "expected a document of key/value pairs, found a {}",
            value.kind_name()
        )),
        map @ Node::Map(_) => {
            let mut table = Table::new();
            flatten("", map, &mut table);
            Ok(table)
        }
    }
}
