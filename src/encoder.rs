//! JSON value to TOON text encoder.
//!
//! Shape selection follows §4.1: every object entry picks a value-suffix
//! (inline scalar, inline primitive array, tabular block, or dashed-list
//! block) purely from the shape of its value. Indentation is the only
//! block delimiter, so every block-producing helper here returns a string
//! in which *every* line (including the first) already carries its own
//! leading indent for the depth it was asked to render at.

use crate::common::Delimiter;
use crate::scalar;
use serde_json::{Map, Number, Value};
use std::collections::{BTreeSet, HashSet};

/// Encoder configuration options.
#[derive(Debug, Clone)]
pub struct EncoderOptions {
    /// Spaces per indentation level (default: 2).
    pub indent: usize,
    /// Field separator for tabular rows and inline primitive arrays.
    pub delimiter: Delimiter,
    /// Whether tabular headers carry a `[N]` row-count prefix.
    pub length_marker: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: true,
        }
    }
}

/// Encode a JSON value to TOON text. Total on every well-formed value tree.
pub fn encode(value: &Value, options: &EncoderOptions) -> String {
    encode_bare(value, 0, options)
}

fn indent(depth: usize, options: &EncoderOptions) -> String {
    " ".repeat(depth * options.indent)
}

fn encode_scalar(value: &Value, options: &EncoderOptions) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => scalar::encode_number(n),
        Value::String(s) => scalar::encode_string(s, options.delimiter.as_char()),
        // Containers never reach this path; callers only invoke it on leaves.
        other => scalar::encode_string(&other.to_string(), options.delimiter.as_char()),
    }
}

fn is_primitive_value(v: &Value) -> bool {
    matches!(v, Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn is_primitive_array(arr: &[Value]) -> bool {
    arr.iter().all(is_primitive_value)
}

/// Detect a uniform array (§3) and return its tabular header field order
/// (union of keys across rows, first-seen order), or `None` if the array
/// doesn't qualify for tabular encoding.
///
/// Two restrictions beyond the literal §3 text (open-question resolutions
/// #3/#4): a first row with zero keys never qualifies (its header would be
/// unparseable), and every present cell across every row must be a
/// primitive (§4.1.3 only defines scalar encoding for cells).
fn detect_tabular(arr: &[Value]) -> Option<Vec<String>> {
    if arr.is_empty() {
        return None;
    }
    let objects: Vec<&Map<String, Value>> =
        arr.iter().map(|v| v.as_object()).collect::<Option<_>>()?;

    let first = objects[0];
    let k_set: BTreeSet<&str> = first.keys().map(|s| s.as_str()).collect();
    let k_len = k_set.len();
    if k_len == 0 {
        return None;
    }
    let threshold = (4 * k_len + 4) / 5;

    for obj in &objects {
        let overlap = obj.keys().filter(|k| k_set.contains(k.as_str())).count();
        if overlap < threshold {
            return None;
        }
    }

    let mut fields = Vec::new();
    let mut seen = HashSet::new();
    for obj in &objects {
        for key in obj.keys() {
            if seen.insert(key.clone()) {
                fields.push(key.clone());
            }
        }
    }

    for obj in &objects {
        for field in &fields {
            if let Some(v) = obj.get(field) {
                if !is_primitive_value(v) {
                    return None;
                }
            }
        }
    }

    Some(fields)
}

fn encode_inline_primitive(arr: &[Value], options: &EncoderOptions) -> String {
    let delim = options.delimiter.as_char().to_string();
    arr.iter()
        .map(|v| encode_scalar(v, options))
        .collect::<Vec<_>>()
        .join(&delim)
}

/// Tabular block (§4.1.3): header self-indented at `depth`, rows at
/// `depth + 1`, no trailing newline.
fn encode_tabular_block(
    rows: &[Value],
    fields: &[String],
    depth: usize,
    options: &EncoderOptions,
) -> String {
    let delim = options.delimiter.as_char();
    let mut out = indent(depth, options);
    if options.length_marker {
        out.push('[');
        out.push_str(&rows.len().to_string());
        out.push(']');
    }
    out.push('{');
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delim);
        }
        out.push_str(&scalar::encode_key(field, delim));
    }
    out.push_str("}:");

    for row in rows {
        out.push('\n');
        out.push_str(&indent(depth + 1, options));
        let obj = row.as_object().expect("detect_tabular guarantees objects");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(delim);
            }
            match obj.get(field) {
                Some(v) => out.push_str(&encode_scalar(v, options)),
                None => out.push_str("null"),
            }
        }
    }
    out
}

/// Dashed-list block (§4.1.3): one `-` per element, self-indented at
/// `depth`. Multi-line elements get a bare `-` line followed by their
/// encoding re-indented to `depth + 1`; single-line elements stay inline.
fn encode_dashed_list_block(items: &[Value], depth: usize, options: &EncoderOptions) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&indent(depth, options));
        out.push('-');

        let body = encode_bare(item, 0, options);
        if body.contains('\n') {
            out.push('\n');
            for (j, line) in body.lines().enumerate() {
                if j > 0 {
                    out.push('\n');
                }
                out.push_str(&indent(depth + 1, options));
                out.push_str(line);
            }
        } else {
            out.push(' ');
            out.push_str(&body);
        }
    }
    out
}

/// Object block (§4.1.2): one line per entry, self-indented at `depth`.
fn encode_object(obj: &Map<String, Value>, depth: usize, options: &EncoderOptions) -> String {
    let mut out = String::new();
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&indent(depth, options));
        out.push_str(&scalar::encode_key(key, options.delimiter.as_char()));
        out.push(':');
        out.push_str(&entry_suffix(value, depth, options));
    }
    out
}

/// Value-suffix for an object entry (§4.1.4).
///
/// Resolves open question #1: a uniform array's tabular header is placed
/// at the *same* indent as the owning key (not `depth + 1`), matching the
/// decoder's documented lookahead; every other shape follows the table
/// literally.
fn entry_suffix(value: &Value, depth: usize, options: &EncoderOptions) -> String {
    match value {
        Value::Object(o) if o.is_empty() => " {}".to_string(),
        Value::Object(o) => format!("\n{}", encode_object(o, depth + 1, options)),
        Value::Array(a) if a.is_empty() => " []".to_string(),
        Value::Array(a) => {
            if let Some(fields) = detect_tabular(a) {
                format!("\n{}", encode_tabular_block(a, &fields, depth, options))
            } else if is_primitive_array(a) {
                format!(" {}", encode_inline_primitive(a, options))
            } else {
                format!("\n{}", encode_dashed_list_block(a, depth + 1, options))
            }
        }
        _ => format!(" {}", encode_scalar(value, options)),
    }
}

/// Generic ("bare") value encoding used at the document root and for
/// dashed-list elements: no leading space, empty containers collapse to
/// their literal `{}`/`[]` form.
fn encode_bare(value: &Value, depth: usize, options: &EncoderOptions) -> String {
    match value {
        Value::Object(o) if o.is_empty() => "{}".to_string(),
        Value::Object(o) => encode_object(o, depth, options),
        Value::Array(a) if a.is_empty() => "[]".to_string(),
        Value::Array(a) => {
            if let Some(fields) = detect_tabular(a) {
                encode_tabular_block(a, &fields, depth, options)
            } else if is_primitive_array(a) {
                encode_inline_primitive(a, options)
            } else {
                encode_dashed_list_block(a, depth, options)
            }
        }
        _ => encode_scalar(value, options),
    }
}

/// Normalize a bare number the way the encoder does, for callers that need
/// the textual form without encoding a whole value tree.
pub fn normalize_number(n: &Number) -> String {
    scalar::encode_number(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_at_root() {
        assert_eq!(encode(&json!({}), &EncoderOptions::default()), "{}");
    }

    #[test]
    fn empty_array_at_root() {
        assert_eq!(encode(&json!([]), &EncoderOptions::default()), "[]");
    }

    #[test]
    fn simple_object() {
        let data = json!({"name": "Alice", "age": 30});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "name: Alice\nage: 30"
        );
    }

    #[test]
    fn nested_object() {
        let data = json!({"user": {"name": "Bob", "id": 123}});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "user:\n  name: Bob\n  id: 123"
        );
    }

    #[test]
    fn primitive_array_inline_no_brackets() {
        let data = json!({"colors": ["red", "green", "blue"]});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "colors: red,green,blue"
        );
    }

    #[test]
    fn empty_array_value_is_bracket_pair() {
        let data = json!({"items": []});
        assert_eq!(encode(&data, &EncoderOptions::default()), "items: []");
    }

    #[test]
    fn empty_object_value_is_brace_pair() {
        let data = json!({"meta": {}});
        assert_eq!(encode(&data, &EncoderOptions::default()), "meta: {}");
    }

    #[test]
    fn tabular_array_at_root() {
        let data = json!([
            {"id": 1, "name": "Alice", "role": "admin"},
            {"id": 2, "name": "Bob", "role": "user"}
        ]);
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user"
        );
    }

    #[test]
    fn tabular_array_under_key_shares_key_indent() {
        let data = json!({"users": [
            {"id": 1, "name": "Alice"},
            {"id": 2, "name": "Bob"}
        ]});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "users:\n[2]{id,name}:\n  1,Alice\n  2,Bob"
        );
    }

    #[test]
    fn length_marker_toggle() {
        let data = json!([{"a": 1}, {"a": 2}]);
        let opts = EncoderOptions {
            length_marker: false,
            ..EncoderOptions::default()
        };
        let out = encode(&data, &opts);
        assert!(!out.contains('['));
        assert_eq!(out, "{a}:\n  1\n  2");
    }

    #[test]
    fn eighty_percent_rule_admits_row() {
        let data = json!([
            {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5},
            {"a": 6, "b": 7, "c": 8, "d": 9}
        ]);
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "[2]{a,b,c,d,e}:\n  1,2,3,4,5\n  6,7,8,9,null"
        );
    }

    #[test]
    fn eighty_percent_rule_disqualifies_low_overlap_row() {
        // |K|=5, threshold=4; second row overlaps only 2 keys -> not tabular.
        let data = json!([
            {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5},
            {"a": 6, "z": 7}
        ]);
        let out = encode(&data, &EncoderOptions::default());
        assert!(!out.contains('{'));
        assert!(out.starts_with('-'));
    }

    #[test]
    fn disjoint_objects_become_dashed_list() {
        let data = json!(["string", 42, {"key": "value"}]);
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "- string\n- 42\n- key: value"
        );
    }

    #[test]
    fn multi_entry_object_as_dash_item_gets_bare_dash() {
        let data = json!(["string", {"a": 1, "b": 2}]);
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "- string\n-\n  a: 1\n  b: 2"
        );
    }

    #[test]
    fn nested_primitive_arrays_as_dash_items() {
        let data = json!({"matrix": [[1, 2], [3, 4]]});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "matrix:\n  - 1,2\n  - 3,4"
        );
    }

    #[test]
    fn quoting_colon() {
        let data = json!({"url": "http://example.com:8080"});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "url: \"http://example.com:8080\""
        );
    }

    #[test]
    fn quoting_reserved_words() {
        let data = json!({"key": "true"});
        assert_eq!(encode(&data, &EncoderOptions::default()), "key: \"true\"");
    }

    #[test]
    fn number_normalization() {
        let data = json!({"int": 42, "float": 3.14, "negative": -100});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "int: 42\nfloat: 3.14\nnegative: -100"
        );
    }

    #[test]
    fn tab_delimiter_in_tabular_row() {
        let data = json!({"items": [
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B"}
        ]});
        let opts = EncoderOptions {
            delimiter: Delimiter::TAB,
            ..EncoderOptions::default()
        };
        assert_eq!(
            encode(&data, &opts),
            "items:\n[2]{id\tname}:\n  1\tA\n  2\tB"
        );
    }

    #[test]
    fn pipe_delimiter_inline() {
        let data = json!({"tags": ["a", "b", "c"]});
        let opts = EncoderOptions {
            delimiter: Delimiter::PIPE,
            ..EncoderOptions::default()
        };
        assert_eq!(encode(&data, &opts), "tags: a|b|c");
    }

    #[test]
    fn custom_delimiter_quotes_fields_containing_it() {
        let data = json!({"tags": ["a|b", "c"]});
        let opts = EncoderOptions {
            delimiter: Delimiter::PIPE,
            ..EncoderOptions::default()
        };
        assert_eq!(encode(&data, &opts), "tags: \"a|b\"|c");
    }

    #[test]
    fn deep_nesting() {
        let data = json!({"a": {"b": {"c": "value"}}});
        assert_eq!(
            encode(&data, &EncoderOptions::default()),
            "a:\n  b:\n    c: value"
        );
    }
}
