//! Text rendering for the node tree.
//!
//! Two forms: compact (no whitespace, elements joined with `,`) and
//! pretty-printed with a configurable indent width. Both assume an
//! acyclic tree; the cycle guard guarantees that upstream.

use crate::node::{JsonArray, JsonNode, JsonObject};

/// Renders `node` as JSON text.
///
/// `indent_factor == 0` yields the compact form. Otherwise the tree is
/// pretty-printed with `indent_factor` spaces per nesting level. Empty
/// arrays and objects always render as `[]` / `{}`, and a single-element
/// array stays on one line.
pub fn to_text(node: &JsonNode, indent_factor: usize) -> String {
    let mut out = String::new();
    if indent_factor == 0 {
        write_compact(node, &mut out);
    } else {
        write_pretty(node, indent_factor, 0, &mut out);
    }
    out
}

fn write_compact(node: &JsonNode, out: &mut String) {
    match node {
        JsonNode::Null => out.push_str("null"),
        JsonNode::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonNode::Number(n) => out.push_str(&n.to_string()),
        JsonNode::String(s) => write_quoted(s, out),
        JsonNode::Function(f) => out.push_str(&f.to_string()),
        JsonNode::Array(array) => {
            out.push('[');
            for (i, element) in array.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(element, out);
            }
            out.push(']');
        }
        JsonNode::Object(object) => {
            if object.is_null_object() {
                out.push_str("null");
                return;
            }
            out.push('{');
            for (i, (key, value)) in object.entries().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_quoted(key, out);
                out.push(':');
                write_compact(value, out);
            }
            out.push('}');
        }
    }
}

fn write_pretty(node: &JsonNode, factor: usize, indent: usize, out: &mut String) {
    match node {
        JsonNode::Array(array) => write_pretty_array(array, factor, indent, out),
        JsonNode::Object(object) => write_pretty_object(object, factor, indent, out),
        scalar => write_compact(scalar, out),
    }
}

fn write_pretty_array(array: &JsonArray, factor: usize, indent: usize, out: &mut String) {
    if array.is_empty() {
        out.push_str("[]");
        return;
    }
    if array.len() == 1
        && let Some(only) = array.get(0)
    {
        // Single-element arrays stay on one line.
        out.push('[');
        write_pretty(only, factor, indent, out);
        out.push(']');
        return;
    }
    let inner = indent + factor;
    out.push_str("[\n");
    for (i, element) in array.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_spaces(inner, out);
        write_pretty(element, factor, inner, out);
    }
    out.push('\n');
    push_spaces(indent, out);
    out.push(']');
}

fn write_pretty_object(object: &JsonObject, factor: usize, indent: usize, out: &mut String) {
    if object.is_null_object() {
        out.push_str("null");
        return;
    }
    if object.is_empty() {
        out.push_str("{}");
        return;
    }
    if object.len() == 1
        && let Some((key, value)) = object.entries().next()
    {
        out.push('{');
        write_quoted(key, out);
        out.push_str(": ");
        write_pretty(value, factor, indent, out);
        out.push('}');
        return;
    }
    let inner = indent + factor;
    out.push_str("{\n");
    for (i, (key, value)) in object.entries().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_spaces(inner, out);
        write_quoted(key, out);
        out.push_str(": ");
        write_pretty(value, factor, inner, out);
    }
    out.push('\n');
    push_spaces(indent, out);
    out.push('}');
}

fn push_spaces(count: usize, out: &mut String) {
    for _ in 0..count {
        out.push(' ');
    }
}

/// Quotes and escapes a string per JSON conventions.
///
/// `/` is escaped when it follows `<` (keeps `</script>` inert inside
/// HTML), and U+2028/U+2029 are escaped since raw they break JS parsers.
fn write_quoted(value: &str, out: &mut String) {
    out.push('"');
    let mut previous = '\0';
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '/' if previous == '<' => out.push_str("\\/"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
        previous = ch;
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{JsonFunction, JsonObject};

    fn object(entries: &[(&str, JsonNode)]) -> JsonNode {
        let mut result = JsonObject::new();
        for (key, value) in entries {
            result.element(*key, value.clone()).unwrap();
        }
        JsonNode::Object(result)
    }

    #[test]
    fn compact_has_no_whitespace() {
        let node = object(&[
            ("a", JsonNode::from(1)),
            ("b", JsonNode::Array(JsonArray::from(vec![
                JsonNode::from(true),
                JsonNode::Null,
            ]))),
        ]);
        assert_eq!(to_text(&node, 0), r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn empty_composites_render_bare_at_any_indent() {
        assert_eq!(to_text(&JsonNode::Array(JsonArray::new()), 2), "[]");
        assert_eq!(to_text(&JsonNode::Object(JsonObject::new()), 2), "{}");
    }

    #[test]
    fn single_element_array_stays_on_one_line() {
        let node = JsonNode::Array(JsonArray::from(vec![JsonNode::from(7)]));
        assert_eq!(to_text(&node, 2), "[7]");
    }

    #[test]
    fn pretty_indents_nested_structures() {
        let node = object(&[
            ("a", JsonNode::from(1)),
            ("b", JsonNode::Array(JsonArray::from(vec![
                JsonNode::from(1),
                JsonNode::from(2),
            ]))),
        ]);
        let expected = "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}";
        assert_eq!(to_text(&node, 2), expected);
    }

    #[test]
    fn null_object_renders_as_null() {
        let node = JsonNode::Object(JsonObject::null_object());
        assert_eq!(to_text(&node, 0), "null");
        assert_eq!(to_text(&node, 2), "null");
    }

    #[test]
    fn function_literal_is_unquoted() {
        let node = JsonNode::Function(JsonFunction::new(["i"], "return i;"));
        assert_eq!(to_text(&node, 0), "function(i){return i;}");
    }

    #[test]
    fn strings_are_escaped() {
        let node = JsonNode::from("a\"b\\c\n</");
        assert_eq!(to_text(&node, 0), r#""a\"b\\c\n<\/""#);
        assert_eq!(to_text(&JsonNode::from("x\u{2}"), 0), "\"x\\u0002\"");
    }
}
