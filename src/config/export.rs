//! Rendering of the external schema.
//!
//! The build tool reads either plain JSON or a CommonJS config module. In
//! the module form plugins are `require(...)` calls rather than strings.

use crate::config::schema::SchemaObject;

use serde_json::Value;

const INDENT: &str = "    ";

/// Renders the schema as pretty-printed JSON, keys in declaration order.
///
/// # Errors
///
/// Returns an error if a plugin option value cannot be serialized.
pub fn to_json(schema: &SchemaObject) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(schema)?;
    out.push('\n');
    Ok(out)
}

/// Renders the schema as a CommonJS module:
///
/// ```js
/// module.exports = {
///     content: ["./**/*.py"],
///     ...
///     plugins: [require("daisyui")],
///     daisyui: {
///         themes: ["fantasy"]
///     }
/// };
/// ```
///
/// # Errors
///
/// Returns an error if a plugin option value cannot be serialized.
pub fn to_js_module(schema: &SchemaObject) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(schema)?;
    let mut out = String::from("module.exports = ");
    write_value(&mut out, &value, 0, true);
    out.push_str(";\n");
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, depth: usize, top_level: bool) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            let last = map.len() - 1;
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                write_key(out, key);
                out.push_str(": ");
                if top_level && key == "plugins" {
                    write_plugins(out, item, depth + 1);
                } else {
                    write_value(out, item, depth + 1, false);
                }
                out.push_str(if i == last { "\n" } else { ",\n" });
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&item.to_string());
            }
            out.push(']');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1, false);
                out.push_str(if i == last { "\n" } else { ",\n" });
            }
            push_indent(out, depth);
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_plugins(out: &mut String, value: &Value, depth: usize) {
    let Value::Array(items) = value else {
        write_value(out, value, depth, false);
        return;
    };

    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match item {
            Value::String(_) => {
                out.push_str("require(");
                out.push_str(&item.to_string());
                out.push(')');
            }
            other => write_value(out, other, depth, false),
        }
    }
    out.push(']');
}

/// Bare identifiers stay unquoted; everything else is a quoted string key.
fn write_key(out: &mut String, key: &str) {
    if is_js_identifier(key) {
        out.push_str(key);
    } else {
        out.push_str(&Value::String(key.to_string()).to_string());
    }
}

fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

// ============================================================================
// Tests
// ============================================================================
