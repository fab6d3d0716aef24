//! Console-style value formatting.
//!
//! `inspect` renders a value the way an interactive console shows it:
//! strings quoted, objects as `{ key: value }`, arrays as `[ a, b ]`,
//! functions as `[Function: name]`. Nesting deeper than `MAX_DEPTH`
//! collapses to `[Object]` / `[Array]` and cycles print `[Circular]`.

use super::{number_to_string, Value};

const MAX_DEPTH: usize = 2;

/// Format a value for display inside a console line.
pub fn inspect(value: &Value) -> String {
    let mut out = String::new();
    Inspector::default().write(&mut out, value, 0);
    out
}

/// Format `console.log` arguments: top-level strings print raw, everything
/// else through `inspect`, separated by single spaces.
pub fn format_log_line(args: &[Value]) -> String {
    let parts: Vec<String> = args
        .iter()
        .map(|arg| match arg {
            Value::Str(s) => s.to_string(),
            other => inspect(other),
        })
        .collect();
    parts.join(" ")
}

#[derive(Default)]
struct Inspector {
    /// Addresses of the containers currently being printed.
    stack: Vec<usize>,
}

impl Inspector {
    fn write(&mut self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Undefined => out.push_str("undefined"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => out.push_str("-0"),
            Value::Number(n) => out.push_str(&number_to_string(*n)),
            Value::Str(s) => write_quoted(out, s),
            Value::Function(func) => {
                if func.name().is_empty() {
                    out.push_str("[Function (anonymous)]");
                } else {
                    out.push_str("[Function: ");
                    out.push_str(func.name());
                    out.push(']');
                }
            }
            Value::Array(items) => {
                let addr = items.addr();
                if self.stack.contains(&addr) {
                    out.push_str("[Circular]");
                    return;
                }
                let items = items.borrow();
                if items.is_empty() {
                    out.push_str("[]");
                } else if depth > MAX_DEPTH {
                    out.push_str("[Array]");
                } else {
                    self.stack.push(addr);
                    out.push_str("[ ");
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write(out, item, depth + 1);
                    }
                    out.push_str(" ]");
                    self.stack.pop();
                }
            }
            Value::Object(map) => {
                let addr = map.addr();
                if self.stack.contains(&addr) {
                    out.push_str("[Circular]");
                    return;
                }
                let map = map.borrow();
                if map.is_empty() {
                    out.push_str("{}");
                } else if depth > MAX_DEPTH {
                    out.push_str("[Object]");
                } else {
                    self.stack.push(addr);
                    out.push_str("{ ");
                    for (i, (key, item)) in map.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        if is_plain_key(key) {
                            out.push_str(key);
                        } else {
                            write_quoted(out, key);
                        }
                        out.push_str(": ");
                        self.write(out, item, depth + 1);
                    }
                    out.push_str(" }");
                    self.stack.pop();
                }
            }
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
}
