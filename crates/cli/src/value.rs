//! Argument text → Value auto-detection.
//!
//! Detection order:
//! 1. JSON list/object/string (starts with `[`, `{`, or `"`)
//! 2. `nil` / `null` → Nil
//! 3. `true` / `false` → Bool
//! 4. Integer (i64)
//! 5. Anything else → Str

use kvbridge_executor::Value;

/// Parse one argument token into a [`Value`].
pub fn parse_value(s: &str) -> Value {
    let trimmed = s.trim();

    if trimmed.starts_with('[') || trimmed.starts_with('{') || trimmed.starts_with('"') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
            return Value::from(json);
        }
    }

    match trimmed {
        "nil" | "null" => return Value::Nil,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }

    Value::Str(s.to_string())
}

/// Parse every token of a line.
pub fn parse_values<S: AsRef<str>>(tokens: &[S]) -> Vec<Value> {
    tokens.iter().map(|t| parse_value(t.as_ref())).collect()
}
