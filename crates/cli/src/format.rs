//! Reply → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): Redis-style, e.g. `"value"`, `(integer) 42`, `(nil)`
//! - **JSON** (`--json`): `serde_json::to_string_pretty`
//! - **Raw** (`--raw`): Bare values, no quotes, no type prefixes
//!
//! Map entries are printed sorted: string maps by key, score maps by score
//! then key.

use kvbridge_executor::{Error, Reply, Value};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a dispatch reply.
pub fn format_reply(reply: &Reply, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(reply),
        OutputMode::Raw => format_raw(reply),
        OutputMode::Human => format_human(reply),
    }
}

/// Format a caller error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Raw => format!("{}", err),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn format_json(reply: &Reply) -> String {
    let json = match reply {
        Reply::Success(values) => serde_json::json!({
            "ok": true,
            "values": values
                .iter()
                .cloned()
                .map(serde_json::Value::from)
                .collect::<Vec<_>>(),
        }),
        Reply::Failure(kind, code) => serde_json::json!({
            "ok": false,
            "kind": kind.as_str(),
            "code": code,
        }),
    };
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| format!("{:?}", reply))
}

fn format_human(reply: &Reply) -> String {
    match reply {
        Reply::Success(values) if values.is_empty() => "OK".to_string(),
        Reply::Success(values) => values
            .iter()
            .map(format_value_human)
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::Failure(kind, code) => format!("(failure) {}: {}", kind, code),
    }
}

fn format_raw(reply: &Reply) -> String {
    match reply {
        Reply::Success(values) => values
            .iter()
            .map(format_value_raw)
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::Failure(kind, code) => format!("{} {}", kind, code),
    }
}

fn sorted_pairs(value: &Value) -> Vec<(String, String, String)> {
    match value {
        Value::Map(m) => {
            let mut entries: Vec<_> = m.iter().collect();
            entries.sort();
            entries
                .into_iter()
                .map(|(k, v)| (k.clone(), format!("\"{}\"", v), v.clone()))
                .collect()
        }
        Value::IntMap(m) => {
            let mut entries: Vec<_> = m.iter().collect();
            entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
            entries
                .into_iter()
                .map(|(k, v)| (k.clone(), format!("(integer) {}", v), v.to_string()))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Human rendering of one value.
pub fn format_value_human(value: &Value) -> String {
    match value {
        Value::Nil => "(nil)".to_string(),
        Value::Bool(b) => format!("({})", b),
        Value::Int(i) => format!("(integer) {}", i),
        Value::Str(s) => format!("\"{}\"", s),
        Value::List(items) if items.is_empty() => "(empty list)".to_string(),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) \"{}\"", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Map(m) if m.is_empty() => "(empty map)".to_string(),
        Value::IntMap(m) if m.is_empty() => "(empty map)".to_string(),
        Value::Map(_) | Value::IntMap(_) => sorted_pairs(value)
            .into_iter()
            .map(|(k, human, _)| format!("{} => {}", k, human))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Raw rendering of one value.
pub fn format_value_raw(value: &Value) -> String {
    match value {
        Value::Nil => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Str(s) => s.clone(),
        Value::List(items) => items.join("\n"),
        Value::Map(_) | Value::IntMap(_) => sorted_pairs(value)
            .into_iter()
            .map(|(k, _, raw)| format!("{}\t{}", k, raw))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvbridge_executor::FailureKind;
    use std::collections::HashMap;

    #[test]
    fn human_scalars() {
        assert_eq!(format_value_human(&Value::Nil), "(nil)");
        assert_eq!(format_value_human(&Value::Int(3)), "(integer) 3");
        assert_eq!(format_value_human(&Value::from("v")), "\"v\"");
    }

    #[test]
    fn human_list_is_numbered() {
        let v = Value::List(vec!["a".into(), "b".into()]);
        assert_eq!(format_value_human(&v), "1) \"a\"\n2) \"b\"");
        assert_eq!(format_value_human(&Value::List(vec![])), "(empty list)");
    }

    #[test]
    fn score_map_sorted_by_score() {
        let mut m = HashMap::new();
        m.insert("b".to_string(), 1);
        m.insert("a".to_string(), 5);
        m.insert("c".to_string(), 1);
        let v = Value::IntMap(m);
        assert_eq!(
            format_value_human(&v),
            "b => (integer) 1\nc => (integer) 1\na => (integer) 5"
        );
        assert_eq!(format_value_raw(&v), "b\t1\nc\t1\na\t5");
    }

    #[test]
    fn empty_success_is_ok() {
        assert_eq!(format_reply(&Reply::Success(vec![]), OutputMode::Human), "OK");
        assert_eq!(format_reply(&Reply::Success(vec![]), OutputMode::Raw), "");
    }

    #[test]
    fn failure_modes() {
        let reply = Reply::Failure(FailureKind::NotFound, "not_found".into());
        assert_eq!(
            format_reply(&reply, OutputMode::Human),
            "(failure) notfound: not_found"
        );
        assert_eq!(format_reply(&reply, OutputMode::Raw), "notfound not_found");

        let json: serde_json::Value =
            serde_json::from_str(&format_reply(&reply, OutputMode::Json)).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["kind"], "notfound");
        assert_eq!(json["code"], "not_found");
    }

    #[test]
    fn json_success() {
        let reply = Reply::Success(vec![Value::from("v"), Value::Int(2)]);
        let json: serde_json::Value =
            serde_json::from_str(&format_reply(&reply, OutputMode::Json)).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["values"], serde_json::json!(["v", 2]));
    }

    #[test]
    fn error_modes() {
        let err = Error::UnknownOperation {
            name: "nope".into(),
        };
        assert_eq!(
            format_error(&err, OutputMode::Human),
            "(error) unknown operation: nope"
        );
        assert_eq!(format_error(&err, OutputMode::Raw), "unknown operation: nope");
        assert!(format_error(&err, OutputMode::Json).contains("\"error\""));
    }
}
