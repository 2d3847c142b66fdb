//! Value marshaling between host values and native client arguments.
//!
//! [`to_native`] converts one host [`Value`] into the [`Native`] form a slot
//! expects; [`from_native`] converts one native output into a host value.
//! Both are driven by the descriptor's kinds and its [`MapMode`], never by
//! inspecting the data.
//!
//! | Kind | Host in | Native | Host out |
//! |------|---------|--------|----------|
//! | Str | `Str`, `Int` | `Str` | `Str` |
//! | Int | `Int`, numeric `Str` | `Int` | `Int` |
//! | List | `List` | `Strings` | `List` |
//! | Map (strings) | `Map`, `IntMap` | `Pairs` | `Map` |
//! | Map (integers) | `IntMap`, numeric `Map` | `Scores` | `IntMap` |
//! | Strings | `Str`, `Int`, `List` | `Strings` | `Str` or `List` |

use std::collections::HashMap;

use kvbridge_core::{MapMode, OutputKind, ParamKind, Value};

/// Argument or output in the client library's native shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Native {
    /// Optional slot the caller left out
    Absent,
    /// A string
    Str(String),
    /// A 64-bit integer
    Int(i64),
    /// An ordered sequence of strings
    Strings(Vec<String>),
    /// Flat alternating key/value sequence
    Pairs(Vec<String>),
    /// Member/score pairs
    Scores(Vec<(String, i64)>),
}

impl Native {
    /// Name of the native form, for error messages.
    pub fn form_name(&self) -> &'static str {
        match self {
            Native::Absent => "absent",
            Native::Str(_) => "string",
            Native::Int(_) => "integer",
            Native::Strings(_) => "sequence",
            Native::Pairs(_) => "pairs",
            Native::Scores(_) => "scores",
        }
    }

    /// Whether this is an omitted optional slot.
    pub fn is_absent(&self) -> bool {
        matches!(self, Native::Absent)
    }

    /// Take a string.
    pub fn into_str(self) -> Result<String, MarshalError> {
        match self {
            Native::Str(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Take an integer.
    pub fn into_int(self) -> Result<i64, MarshalError> {
        match self {
            Native::Int(n) => Ok(n),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Take a sequence.
    pub fn into_strings(self) -> Result<Vec<String>, MarshalError> {
        match self {
            Native::Strings(v) => Ok(v),
            other => Err(other.mismatch("sequence")),
        }
    }

    /// Take a flat key/value sequence.
    pub fn into_pairs(self) -> Result<Vec<String>, MarshalError> {
        match self {
            Native::Pairs(v) => Ok(v),
            other => Err(other.mismatch("pairs")),
        }
    }

    /// Take member/score pairs.
    pub fn into_scores(self) -> Result<Vec<(String, i64)>, MarshalError> {
        match self {
            Native::Scores(v) => Ok(v),
            other => Err(other.mismatch("scores")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> MarshalError {
        MarshalError::TypeMismatch {
            expected,
            actual: self.form_name().to_string(),
        }
    }
}

/// Marshaling failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    /// Value has the wrong shape or content for the slot
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// What the slot needs
        expected: &'static str,
        /// What was offered
        actual: String,
    },

    /// A flat key/value sequence had an odd number of elements
    #[error("odd number of elements in key/value sequence: {len}")]
    OddPairs {
        /// Sequence length
        len: usize,
    },
}

/// Parse a numeric-looking string: optional surrounding whitespace, optional
/// sign, decimal digits, within `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn int_from_text(text: &str) -> Result<i64, MarshalError> {
    parse_int(text).ok_or_else(|| MarshalError::TypeMismatch {
        expected: "integer",
        actual: format!("string {:?}", text),
    })
}

fn value_mismatch(expected: &'static str, value: &Value) -> MarshalError {
    MarshalError::TypeMismatch {
        expected,
        actual: value.type_name().to_string(),
    }
}

// =============================================================================
// Host -> native
// =============================================================================

/// Convert one host argument into the native form for a slot.
pub fn to_native(value: &Value, kind: ParamKind, mode: MapMode) -> Result<Native, MarshalError> {
    match kind {
        ParamKind::Str => match value {
            Value::Str(s) => Ok(Native::Str(s.clone())),
            Value::Int(n) => Ok(Native::Str(n.to_string())),
            other => Err(value_mismatch("string", other)),
        },
        ParamKind::Int => match value {
            Value::Int(n) => Ok(Native::Int(*n)),
            Value::Str(s) => int_from_text(s).map(Native::Int),
            other => Err(value_mismatch("integer", other)),
        },
        ParamKind::List => match value {
            Value::List(items) => Ok(Native::Strings(items.clone())),
            other => Err(value_mismatch("list", other)),
        },
        ParamKind::Map => map_to_native(value, mode),
        ParamKind::Strings => match value {
            Value::Str(s) => Ok(Native::Strings(vec![s.clone()])),
            Value::Int(n) => Ok(Native::Strings(vec![n.to_string()])),
            Value::List(items) => Ok(Native::Strings(items.clone())),
            other => Err(value_mismatch("string or list", other)),
        },
    }
}

fn map_to_native(value: &Value, mode: MapMode) -> Result<Native, MarshalError> {
    match (value, mode) {
        (Value::Map(map), MapMode::Strings) => Ok(Native::Pairs(
            map.iter()
                .flat_map(|(k, v)| [k.clone(), v.clone()])
                .collect(),
        )),
        (Value::IntMap(map), MapMode::Strings) => Ok(Native::Pairs(
            map.iter()
                .flat_map(|(k, v)| [k.clone(), v.to_string()])
                .collect(),
        )),
        (Value::IntMap(map), MapMode::Integers) => Ok(Native::Scores(
            map.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        )),
        (Value::Map(map), MapMode::Integers) => map
            .iter()
            .map(|(k, v)| int_from_text(v).map(|score| (k.clone(), score)))
            .collect::<Result<Vec<_>, _>>()
            .map(Native::Scores),
        (other, _) => Err(value_mismatch("map", other)),
    }
}

// =============================================================================
// Native -> host
// =============================================================================

/// Convert one native output into a host value.
pub fn from_native(native: Native, kind: OutputKind, mode: MapMode) -> Result<Value, MarshalError> {
    match (kind, native) {
        (OutputKind::Str, Native::Str(s)) => Ok(Value::Str(s)),
        (OutputKind::Int, Native::Int(n)) => Ok(Value::Int(n)),
        (OutputKind::List, Native::Strings(items)) => Ok(Value::List(items)),
        (OutputKind::Map, Native::Pairs(flat)) => pairs_to_value(flat, mode),
        (OutputKind::Map, Native::Scores(scores)) => Ok(scores_to_value(scores, mode)),
        (OutputKind::Strings, Native::Str(s)) => Ok(Value::Str(s)),
        (OutputKind::Strings, Native::Strings(items)) => Ok(Value::List(items)),
        (kind, other) => Err(other.mismatch(kind.name())),
    }
}

/// Group a flat alternating sequence into a map of the mode's value type.
pub fn pairs_to_value(flat: Vec<String>, mode: MapMode) -> Result<Value, MarshalError> {
    if flat.len() % 2 != 0 {
        return Err(MarshalError::OddPairs { len: flat.len() });
    }
    let mut iter = flat.into_iter();
    match mode {
        MapMode::Strings => {
            let mut map = HashMap::new();
            while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
                map.insert(k, v);
            }
            Ok(Value::Map(map))
        }
        MapMode::Integers => {
            let mut map = HashMap::new();
            while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
                map.insert(k, int_from_text(&v)?);
            }
            Ok(Value::IntMap(map))
        }
    }
}

fn scores_to_value(scores: Vec<(String, i64)>, mode: MapMode) -> Value {
    match mode {
        MapMode::Integers => Value::IntMap(scores.into_iter().collect()),
        MapMode::Strings => Value::Map(
            scores
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        ),
    }
}
