//! Argument and result kinds
//!
//! Operation schemas are written in terms of these kinds. A kind describes
//! what the native call needs, not what the host happened to send: the
//! dispatcher checks that a host [`Value`] is *acceptable* for a kind before
//! the marshaler converts it.

use serde::{Deserialize, Serialize};

use crate::Value;

/// Kind of one argument slot in an operation schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// A string. Integers are accepted and rendered in decimal.
    Str,
    /// A 64-bit integer. Numeric-looking strings are accepted.
    Int,
    /// An ordered sequence of strings.
    List,
    /// A map. String or integer values depending on the operation's map mode.
    Map,
    /// Either a single string or a sequence, always delivered as a sequence.
    Strings,
}

impl ParamKind {
    /// Whether a host value has an acceptable shape for this slot.
    ///
    /// This is a shape check only. Content checks (a string that is not a
    /// number, a map value that is not a score) belong to the marshaler.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::Str => matches!(value, Value::Str(_) | Value::Int(_)),
            ParamKind::Int => matches!(value, Value::Int(_) | Value::Str(_)),
            ParamKind::List => matches!(value, Value::List(_)),
            ParamKind::Map => matches!(value, Value::Map(_) | Value::IntMap(_)),
            ParamKind::Strings => {
                matches!(value, Value::Str(_) | Value::Int(_) | Value::List(_))
            }
        }
    }

    /// Human readable name used in argument errors.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Str => "string",
            ParamKind::Int => "integer",
            ParamKind::List => "list",
            ParamKind::Map => "map",
            ParamKind::Strings => "string or list",
        }
    }
}

/// One slot of an operation schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Slot name, reported in argument errors
    pub name: &'static str,
    /// Expected kind
    pub kind: ParamKind,
    /// Whether the caller must supply it
    pub required: bool,
}

impl Param {
    /// A required slot.
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// An optional slot. Missing or nil is delivered as absent.
    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Kind of one value produced by a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// A string
    Str,
    /// An integer
    Int,
    /// An ordered sequence of strings
    List,
    /// A map built from a flat key/value sequence
    Map,
    /// A string or a sequence, decided by the call (queue pop)
    Strings,
}

impl OutputKind {
    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            OutputKind::Str => "string",
            OutputKind::Int => "integer",
            OutputKind::List => "list",
            OutputKind::Map => "map",
            OutputKind::Strings => "string or list",
        }
    }
}

/// How map values are marshaled for an operation.
///
/// This is a fixed property of each operation, never inferred from data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapMode {
    /// Values stay strings (value-bearing operations)
    #[default]
    Strings,
    /// Values are coerced to integers (score-bearing operations)
    Integers,
}
