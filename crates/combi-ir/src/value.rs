//! Dimension values and their textual renderings.
//!
//! Dimension values are heterogeneous: a single dimension may mix strings,
//! numbers, enum variants, lists and null. Two renderings exist:
//! - [`value_to_string`]: human-readable, used in state descriptions.
//! - [`value_to_literal`]: expression literal, used in breakpoint conditions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendering of a null value.
pub const NULL_TOKEN: &str = "[null]";
/// Rendering of an empty string, which would otherwise be invisible.
pub const EMPTY_TOKEN: &str = "[empty]";

/// A single candidate value of a dimension.
///
/// JSON form is untagged: `null`, booleans, integers, floats, strings,
/// arrays, and `{"enum_type": "...", "name": "..."}` for enum variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Enum { enum_type: String, name: String },
}

impl Value {
    /// An enum variant, rendered by `name` alone in descriptions.
    pub fn enum_variant(enum_type: impl Into<String>, name: impl Into<String>) -> Self {
        Value::Enum {
            enum_type: enum_type.into(),
            name: name.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Human-readable rendering of a value.
///
/// Null and the empty string get sentinel tokens, enum variants render by
/// name, lists render as `{a, b}`.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => NULL_TOKEN.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Str(s) if s.is_empty() => EMPTY_TOKEN.to_string(),
        Value::Str(s) => s.clone(),
        Value::Enum { name, .. } => name.clone(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(value_to_string).collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

/// Expression-literal rendering of a value, for conditional breakpoints.
pub fn value_to_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Str(s) => quote(s),
        Value::Enum { enum_type, name } => format!("{enum_type}::{name}"),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(value_to_literal).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
