//! TOON text to JSON value decoder.
//!
//! A total, cursor-over-lines recursive-descent parser (§4.2): every
//! container is disambiguated purely from the shape of its first line —
//! tabular header, leading `-`, or unquoted colon — and nested contexts end
//! the moment indentation drops below what the caller expects. There is no
//! error taxonomy; every input produces some value.

use crate::common::Delimiter;
use crate::scalar;
use serde_json::{Map, Value};

/// Decoder configuration options. Must match the encoder's `indent` and
/// `delimiter` for a round trip to hold.
#[derive(Debug, Clone)]
pub struct DecoderOptions {
    /// Expected spaces per indentation level (default: 2).
    pub indent: usize,
    /// Field separator for tabular rows and inline primitive arrays.
    pub delimiter: Delimiter,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            delimiter: Delimiter::default(),
        }
    }
}

/// Decode TOON text to a JSON value. Total: every input, however malformed,
/// produces some value rather than an error (§7).
pub fn decode(input: &str, options: &DecoderOptions) -> Value {
    let lines: Vec<&str> = input.split('\n').collect();
    let delim = options.delimiter.as_char();

    if lines.len() == 1 {
        let content = lines[0].trim();
        if scalar::has_unquoted_colon(content) {
            let mut cursor = Cursor {
                lines: &lines,
                i: 0,
                options,
            };
            return cursor.parse_hash(0);
        }
        if scalar::has_unquoted_delimiter(content, delim) && !scalar::is_wholly_quoted(content) {
            return Value::Array(
                scalar::split_by_delimiter(content, delim)
                    .iter()
                    .map(|f| scalar::decode_scalar(f))
                    .collect(),
            );
        }
        return scalar::decode_scalar(content);
    }

    let mut cursor = Cursor {
        lines: &lines,
        i: 0,
        options,
    };
    cursor.parse_value(0)
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// `^(\[\d+\])?\{[^}]+\}:$`
fn parse_tabular_header(content: &str, delimiter: char) -> Option<Vec<String>> {
    let mut rest = content;
    if let Some(after_bracket) = rest.strip_prefix('[') {
        let close = after_bracket.find(']')?;
        let digits = &after_bracket[..close];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        rest = &after_bracket[close + 1..];
    }
    let inner = rest.strip_prefix('{')?;
    let close = inner.find('}')?;
    let field_list = &inner[..close];
    if field_list.is_empty() {
        return None;
    }
    if &inner[close + 1..] != ":" {
        return None;
    }
    Some(scalar::split_by_delimiter(field_list, delimiter))
}

fn is_tabular_header_shape(content: &str, delimiter: char) -> bool {
    parse_tabular_header(content, delimiter).is_some()
}

struct Cursor<'a> {
    lines: &'a [&'a str],
    i: usize,
    options: &'a DecoderOptions,
}

impl<'a> Cursor<'a> {
    fn delim(&self) -> char {
        self.options.delimiter.as_char()
    }

    /// `parse_value(expected_indent)` (§4.2.2).
    fn parse_value(&mut self, expected_indent: usize) -> Value {
        if self.i >= self.lines.len() {
            return Value::Null;
        }
        let line = self.lines[self.i];
        let indent = leading_spaces(line);
        if indent < expected_indent {
            return Value::Null;
        }
        let content = line.trim();

        if is_tabular_header_shape(content, self.delim()) {
            self.parse_tabular_array(indent)
        } else if content.starts_with('-') {
            self.parse_list_array(indent)
        } else if scalar::has_unquoted_colon(content) {
            self.parse_hash(indent)
        } else {
            self.i += 1;
            scalar::decode_scalar(content)
        }
    }

    /// `parse_hash(expected_indent)` (§4.2.3).
    fn parse_hash(&mut self, expected_indent: usize) -> Value {
        let mut map = Map::new();
        loop {
            if self.i >= self.lines.len() {
                break;
            }
            let line = self.lines[self.i];
            if leading_spaces(line) < expected_indent {
                break;
            }
            let content = line.trim();
            if content.is_empty()
                || is_tabular_header_shape(content, self.delim())
                || content.starts_with('-')
                || !scalar::has_unquoted_colon(content)
            {
                break;
            }

            let colon = scalar::find_unquoted_colon(content).expect("checked above");
            let key = scalar::decode_key(&content[..colon]);
            let rest = &content[colon + 1..];

            if rest.trim().is_empty() {
                self.i += 1;
                // Tabular headers may appear at the same indent as their
                // parent key line (open question #1); every other nested
                // shape uses the ordinary `parse_value` dispatch.
                if self.i < self.lines.len() {
                    let next_line = self.lines[self.i];
                    let next_content = next_line.trim();
                    if is_tabular_header_shape(next_content, self.delim()) {
                        let header_indent = leading_spaces(next_line);
                        map.insert(key, self.parse_tabular_array(header_indent));
                        continue;
                    }
                }
                let value = self.parse_value(expected_indent);
                map.insert(key, value);
            } else {
                self.i += 1;
                let rest = rest.trim();
                let value = if rest == "[]" {
                    Value::Array(Vec::new())
                } else if rest == "{}" {
                    Value::Object(Map::new())
                } else if scalar::has_unquoted_delimiter(rest, self.delim())
                    && !scalar::is_wholly_quoted(rest)
                {
                    Value::Array(
                        scalar::split_by_delimiter(rest, self.delim())
                            .iter()
                            .map(|f| scalar::decode_scalar(f))
                            .collect(),
                    )
                } else {
                    scalar::decode_scalar(rest)
                };
                map.insert(key, value);
            }
        }
        Value::Object(map)
    }

    /// `parse_tabular_array(expected_indent)` (§4.2.4). `expected_indent`
    /// here is the header line's own indent, not a minimum to exceed.
    fn parse_tabular_array(&mut self, header_indent: usize) -> Value {
        let content = self.lines[self.i].trim();
        let fields = match parse_tabular_header(content, self.delim()) {
            Some(f) => f,
            None => return Value::Array(Vec::new()),
        };
        self.i += 1;

        let mut rows = Vec::new();
        while self.i < self.lines.len() {
            let line = self.lines[self.i];
            if leading_spaces(line) <= header_indent {
                break;
            }
            let content = line.trim();
            if content.is_empty() {
                break;
            }
            if scalar::has_unquoted_colon(content) && !is_tabular_header_shape(content, self.delim())
            {
                break;
            }
            let values = scalar::split_csv_row(content, self.delim());
            let mut obj = Map::new();
            for (field, value) in fields.iter().zip(values.iter()) {
                obj.insert(field.clone(), scalar::decode_scalar(value));
            }
            rows.push(Value::Object(obj));
            self.i += 1;
        }
        Value::Array(rows)
    }

    /// `parse_list_array(expected_indent)` (§4.2.5).
    fn parse_list_array(&mut self, expected_indent: usize) -> Value {
        let mut items = Vec::new();
        loop {
            if self.i >= self.lines.len() {
                break;
            }
            let line = self.lines[self.i];
            if leading_spaces(line) < expected_indent {
                break;
            }
            let content = line.trim();
            if !content.starts_with('-') {
                break;
            }
            let after_dash = &content[1..];
            let rest = after_dash.strip_prefix(' ').unwrap_or(after_dash);
            self.i += 1;
            if rest.is_empty() {
                items.push(self.parse_value(expected_indent + self.options.indent));
            } else if scalar::has_unquoted_delimiter(rest, self.delim())
                && !scalar::is_wholly_quoted(rest)
            {
                items.push(Value::Array(
                    scalar::split_by_delimiter(rest, self.delim())
                        .iter()
                        .map(|f| scalar::decode_scalar(f))
                        .collect(),
                ));
            } else {
                items.push(scalar::decode_scalar(rest));
            }
        }
        Value::Array(items)
    }
}
