//! JSON serializer: converts a [`Value`] tree back into text.
//!
//! Serialization is total: every `Value` has a spelling. The compact form
//! (via [`Display`](std::fmt::Display) / `to_string()`) inserts no
//! whitespace. [`Value::to_pretty_string`] indents two spaces per level.
//!
//! # Example
//! ```
//! use tinyjson_core::Value;
//!
//! let mut doc = Value::new();
//! doc["tags"].push_back("rust").unwrap();
//! doc["note"] = "line1\nline2".into();
//! assert_eq!(doc.to_string(), r#"{"note":"line1\nline2","tags":["rust"]}"#);
//! ```

use crate::value::{Object, Value};
use std::fmt::{self, Write};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        encode_value(self, &mut out);
        f.write_str(&out)
    }
}

impl Value {
    /// Indented JSON, two spaces per level. Re-parses to an equal tree.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        encode_pretty(self, 0, &mut out);
        out
    }
}

/// Compact encoding: recurse into containers, comma-join with no
/// trailing comma.
fn encode_value(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(key, out);
                out.push(':');
                encode_value(item, out);
            }
            out.push('}');
        }
        _ => encode_scalar(value, out),
    }
}

/// Pretty encoding. Empty containers stay on one line (`[]`, `{}`).
fn encode_pretty(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                out.push_str(&make_indent(depth + 1));
                encode_pretty(item, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&make_indent(depth));
            out.push(']');
        }
        Value::Object(map) if !map.is_empty() => encode_pretty_object(map, depth, out),
        _ => encode_value(value, out),
    }
}

fn encode_pretty_object(map: &Object, depth: usize, out: &mut String) {
    out.push('{');
    for (i, (key, item)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('\n');
        out.push_str(&make_indent(depth + 1));
        encode_string(key, out);
        out.push_str(": ");
        encode_pretty(item, depth + 1, out);
    }
    out.push('\n');
    out.push_str(&make_indent(depth));
    out.push('}');
}

fn encode_scalar(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Double(f) => encode_double(*f, out),
        Value::String(s) => encode_string(s, out),
        Value::Array(_) | Value::Object(_) => encode_value(value, out),
    }
}

/// Shortest representation that reads back as the same `f64`.
///
/// `Debug` formatting always keeps a `.` or an exponent (`1000000.0`,
/// `1e300`), so the text re-parses as a `Double` rather than an `Int`.
/// NaN and the infinities have no JSON spelling and become `null`.
fn encode_double(f: f64, out: &mut String) {
    if f.is_finite() {
        let _ = write!(out, "{f:?}");
    } else {
        out.push_str("null");
    }
}

/// Quote and escape a string. Control bytes without a short escape are
/// written as `\u00XX` in lowercase hex.
fn encode_string(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Generate a 2-space-per-level indentation string.
fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}
