//! Host value type
//!
//! This module defines `Value`, the closed set of shapes a host script can
//! hand to the bridge and receive back from it:
//!
//! - Nil, Bool, Int, Str
//! - List: ordered sequence of strings
//! - Map: string → string
//! - IntMap: string → integer
//!
//! ## Type Rules
//!
//! - No floats and no nested containers: the store only speaks strings and
//!   64-bit integers.
//! - `Int(1) != Str("1")`. Coercion between scalars is the marshaler's job,
//!   never `Value`'s.
//! - Map equality ignores enumeration order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dynamic value crossing the host boundary.
///
/// Values are produced by the host for each call and are never retained by
/// the bridge beyond one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value (missing optional argument)
    Nil,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    Str(String),
    /// Ordered sequence of strings
    List(Vec<String>),
    /// Map of string to string
    Map(HashMap<String, String>),
    /// Map of string to integer
    IntMap(HashMap<String, i64>),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::IntMap(_) => "int map",
        }
    }

    /// Check if this is the nil value
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a Str value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a string slice if this is a List value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as &HashMap if this is a Map value
    pub fn as_map(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as &HashMap if this is an IntMap value
    pub fn as_int_map(&self) -> Option<&HashMap<String, i64>> {
        match self {
            Value::IntMap(m) => Some(m),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

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

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Value::List(l)
    }
}

impl From<Vec<&str>> for Value {
    fn from(l: Vec<&str>) -> Self {
        Value::List(l.into_iter().map(str::to_string).collect())
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(m: HashMap<String, String>) -> Self {
        Value::Map(m)
    }
}

impl From<HashMap<String, i64>> for Value {
    fn from(m: HashMap<String, i64>) -> Self {
        Value::IntMap(m)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

// ============================================================================
// serde_json interop
// ============================================================================

/// Render a JSON scalar the way a script runtime would stringify it.
fn json_scalar_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Str(n.to_string()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::List(arr.iter().map(json_scalar_text).collect())
            }
            serde_json::Value::Object(obj) => {
                // An object whose values are all integers is a score map.
                let all_ints = !obj.is_empty() && obj.values().all(|v| v.as_i64().is_some());
                if all_ints {
                    Value::IntMap(
                        obj.into_iter()
                            .filter_map(|(k, v)| v.as_i64().map(|i| (k, i)))
                            .collect(),
                    )
                } else {
                    Value::Map(
                        obj.into_iter()
                            .map(|(k, v)| (k, json_scalar_text(&v)))
                            .collect(),
                    )
                }
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Str(s) => serde_json::Value::String(s),
            Value::List(l) => {
                serde_json::Value::Array(l.into_iter().map(serde_json::Value::String).collect())
            }
            Value::Map(m) => serde_json::Value::Object(
                m.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            ),
            Value::IntMap(m) => serde_json::Value::Object(
                m.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::Number(v.into())))
                    .collect(),
            ),
        }
    }
}
