//! Shared scalar lexicon: quoting rules, literal recognition, and the
//! quote-aware scanning primitives used by both the encoder and the decoder.
//!
//! Keeping this in one module guarantees the encoder's quoting decisions and
//! the decoder's literal recognition agree on exactly the same rules, which
//! is what the round-trip law depends on.

use serde_json::{Number, Value};
use std::borrow::Cow;

/// Characters that always force quoting, regardless of delimiter.
const RESERVED: [char; 9] = [',', ':', '[', ']', '{', '}', '#', '\n', '\r'];
// NB: '\t' is reserved too but listed separately below since it doubles as
// the tab delimiter constant; see `is_reserved_char`.

fn is_reserved_char(c: char, delimiter: char) -> bool {
    RESERVED.contains(&c) || c == '\t' || c == delimiter
}

/// `NEEDS_QUOTES(s)`: leading/trailing space, or any reserved/delimiter char.
pub fn needs_quotes(s: &str, delimiter: char) -> bool {
    s.starts_with(' ') || s.ends_with(' ') || s.chars().any(|c| is_reserved_char(c, delimiter))
}

/// Matches `^-?\d+(\.\d+)?$`.
pub fn looks_numeric(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    match s.split_once('.') {
        None => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.chars().all(|c| c.is_ascii_digit())
                && frac_part.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// Matches `^-?\d+$`.
fn looks_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Matches `^-?\d+\.\d+$`.
fn looks_float(s: &str) -> bool {
    match s.strip_prefix('-').unwrap_or(s).split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.chars().all(|c| c.is_ascii_digit())
                && frac_part.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn is_reserved_word(s: &str) -> bool {
    matches!(s, "true" | "false" | "null")
}

/// Encode a string per §4.3: empty string, quoted-and-escaped, or raw.
pub fn encode_string(s: &str, delimiter: char) -> String {
    if s.is_empty() {
        return "\"\"".to_string();
    }
    if needs_quotes(s, delimiter) || looks_numeric(s) || is_reserved_word(s) {
        quote_and_escape(s)
    } else {
        s.to_string()
    }
}

/// Encode a key exactly like a string scalar (§4.1.2: "only the
/// quoting-needing predicates apply").
pub fn encode_key(s: &str, delimiter: char) -> String {
    encode_string(s, delimiter)
}

/// Wrap `s` in quotes, escaping only `\` and `"` (§9: the escape set is
/// deliberately small).
fn quote_and_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Default textual form of a JSON number (§4.1.1): integer with no
/// fractional part, decimal with at least one fractional digit for floats.
pub fn encode_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(0.0);
    if f.is_nan() || f.is_infinite() {
        // Never produced by a valid JSON tree; round-trip as the host's
        // default textual form if it somehow appears (§3).
        return f.to_string();
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Find the index of the first unquoted `:` in `s`, tracking a quote-toggle
/// flag exactly as §4.2.6 describes (a `"` toggles quoting unless the
/// previous character is a single backslash).
pub fn find_unquoted_colon(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        if c == '"' && prev != Some('\\') {
            in_quotes = !in_quotes;
        } else if c == ':' && !in_quotes {
            return Some(i);
        }
        prev = Some(c);
    }
    None
}

pub fn has_unquoted_colon(s: &str) -> bool {
    find_unquoted_colon(s).is_some()
}

/// True iff `s` contains an unquoted occurrence of `delimiter`.
pub fn has_unquoted_delimiter(s: &str, delimiter: char) -> bool {
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c == '"' && prev != Some('\\') {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// True iff `s` is a single quoted token (`"..."`, length >= 2), i.e. not
/// something a delimiter split should run over.
pub fn is_wholly_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Split `s` on unquoted occurrences of `delimiter`, trimming each field.
/// Used for both tabular field-name lists and CSV row splitting.
pub fn split_by_delimiter(s: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c == '"' && prev != Some('\\') {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
        prev = Some(c);
    }
    fields.push(current.trim().to_string());
    fields
}

/// Split a CSV row (§4.2.6): same quote-aware split, with a trailing empty
/// field (from a trailing delimiter) omitted.
pub fn split_csv_row(s: &str, delimiter: char) -> Vec<String> {
    let mut fields = split_by_delimiter(s, delimiter);
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Remove the outer quotes (if present) and unescape `\\`/`\"`, leaving any
/// other backslash sequence untouched (§9).
fn unescape<'a>(s: &'a str) -> Cow<'a, str> {
    if !is_wholly_quoted(s) {
        return Cow::Borrowed(s);
    }
    let inner = &s[1..s.len() - 1];
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                Some('"') => {
                    out.push('"');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Decode a key token (§4.2.3): quote-stripped-and-unescaped if quoted,
/// otherwise literal text. Unlike `decode_scalar`, a key never becomes a
/// number/bool/null — object keys are always strings (§3).
pub fn decode_key(s: &str) -> String {
    unescape(s.trim()).into_owned()
}

/// Decode a scalar lexeme (§4.3).
pub fn decode_scalar(s: &str) -> Value {
    let trimmed = s.trim();
    match trimmed {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if looks_integer(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Number(i.into());
        }
        if let Ok(u) = trimmed.parse::<u64>() {
            return Value::Number(u.into());
        }
    }
    if looks_float(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            if let Some(n) = Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    if is_wholly_quoted(trimmed) {
        return Value::String(unescape(trimmed).into_owned());
    }
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_minimality() {
        assert_eq!(encode_string("hello", ','), "hello");
        assert_eq!(encode_string("", ','), "\"\"");
        assert_eq!(encode_string(" hello", ','), "\" hello\"");
        assert_eq!(encode_string("hello ", ','), "\"hello \"");
    }

    #[test]
    fn needs_quotes_basic() {
        assert!(needs_quotes(" leading", ','));
        assert!(needs_quotes("trailing ", ','));
        assert!(needs_quotes("a,b", ','));
        assert!(needs_quotes("a:b", ','));
        assert!(!needs_quotes("plain", ','));
    }

    #[test]
    fn delimiter_is_reserved_even_if_not_in_fixed_set() {
        assert!(needs_quotes("a|b", '|'));
        assert!(!needs_quotes("a|b", ','));
    }

    #[test]
    fn reserved_words_and_numeric_like_quoted() {
        assert_eq!(encode_string("true", ','), "\"true\"");
        assert_eq!(encode_string("false", ','), "\"false\"");
        assert_eq!(encode_string("null", ','), "\"null\"");
        assert_eq!(encode_string("42", ','), "\"42\"");
        assert_eq!(encode_string("-3.5", ','), "\"-3.5\"");
        assert_eq!(encode_string("not-a-number", ','), "not-a-number");
    }

    #[test]
    fn escape_set_is_small() {
        assert_eq!(encode_string("a\"b", ','), "\"a\\\"b\"");
        assert_eq!(encode_string("a\\b", ','), "\"a\\\\b\"");
    }

    #[test]
    fn decode_literals() {
        assert_eq!(decode_scalar("null"), Value::Null);
        assert_eq!(decode_scalar("true"), Value::Bool(true));
        assert_eq!(decode_scalar("false"), Value::Bool(false));
        assert_eq!(decode_scalar("42"), Value::from(42));
        assert_eq!(decode_scalar("-42"), Value::from(-42));
        assert_eq!(decode_scalar("3.5"), Value::from(3.5));
        assert_eq!(decode_scalar("plain"), Value::from("plain"));
    }

    #[test]
    fn decode_quoted_string_unescapes() {
        assert_eq!(decode_scalar("\"a\\\"b\""), Value::from("a\"b"));
        assert_eq!(decode_scalar("\"a\\\\b\""), Value::from("a\\b"));
    }

    #[test]
    fn decode_key_never_coerces_type() {
        assert_eq!(decode_key("123"), "123");
        assert_eq!(decode_key("true"), "true");
        assert_eq!(decode_key("\"quoted key\""), "quoted key");
    }

    #[test]
    fn csv_row_drops_trailing_empty_field() {
        assert_eq!(
            split_csv_row("1,Alice,", ','),
            vec!["1".to_string(), "Alice".to_string()]
        );
        assert_eq!(
            split_csv_row("1,Alice", ','),
            vec!["1".to_string(), "Alice".to_string()]
        );
    }

    #[test]
    fn delimiter_split_respects_quotes() {
        assert_eq!(
            split_by_delimiter("\"a,b\",c", ','),
            vec!["\"a,b\"".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn number_formatting() {
        assert_eq!(encode_number(&Number::from(42)), "42");
        assert_eq!(encode_number(&Number::from(-42)), "-42");
        assert_eq!(
            encode_number(&Number::from_f64(3.5).unwrap()),
            "3.5"
        );
        assert_eq!(
            encode_number(&Number::from_f64(3.0).unwrap()),
            "3.0"
        );
    }
}
