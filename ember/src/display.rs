//! Terminal rendering of interpreter values.
//!
//! Same text as [`Value::to_display_string`], wrapped in ANSI colours when
//! the output is a terminal.

use ember_interpreter::Value;

const RESET: &str = "\x1b[0m";
const NUMBER: &str = "\x1b[32m"; // Green
const STRING: &str = "\x1b[33m"; // Yellow
const KEYWORD: &str = "\x1b[35m"; // Magenta

/// Render `value` for the terminal, colouring scalars when `colors` is set
///
/// Functions and object keys stay uncoloured.
pub fn render_value(value: &Value, colors: bool) -> String {
    if !colors {
        return value.to_display_string();
    }

    match value {
        Value::Number(_) => paint(NUMBER, &value.to_display_string()),
        Value::String(_) => paint(STRING, &value.to_display_string()),
        Value::Boolean(_) | Value::Null => paint(KEYWORD, &value.to_display_string()),
        Value::Function(_) | Value::NativeFunction(_) => value.to_display_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|item| render_value(item, true)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) if entries.is_empty() => "{ }".to_string(),
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{key}: {}", render_value(value, true)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_rendering_matches_display_string() {
        let value = Value::Array(vec![Value::Number(1), Value::string("a"), Value::Null]);
        assert_eq!(render_value(&value, false), "[1, \"a\", null]");
    }

    #[test]
    fn test_colored_rendering_keeps_text() {
        let value = Value::Array(vec![Value::Number(1), Value::Boolean(true)]);
        let rendered = render_value(&value, true);

        assert!(rendered.contains("\x1b["));
        assert_eq!(strip_ansi(&rendered), value.to_display_string());
    }

    #[test]
    fn test_scalar_colors() {
        assert_eq!(render_value(&Value::Number(7), true), "\x1b[32m7\x1b[0m");
        assert_eq!(render_value(&Value::string("hi"), true), "\x1b[33m\"hi\"\x1b[0m");
        assert_eq!(render_value(&Value::Null, true), "\x1b[35mnull\x1b[0m");
        assert_eq!(render_value(&Value::Boolean(false), true), "\x1b[35mfalse\x1b[0m");
    }

    #[test]
    fn test_colored_object_keeps_order() {
        let value = Value::Object(
            [
                ("z".to_string(), Value::Number(1)),
                ("a".to_string(), Value::string("x")),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(strip_ansi(&render_value(&value, true)), "{ z: 1, a: \"x\" }");
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }
}
