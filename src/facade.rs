//! External contract (§6): a thin JSON-or-literal dispatcher for encode, and
//! a JSON-string wrapper for decode. This layer is explicitly named a
//! Non-goal of the *core* algorithm (§1) but is still the external contract
//! a host actually calls, so it lives in its own module that calls straight
//! into `encoder`/`decoder` rather than duplicating any shape logic.

use crate::common::Delimiter;
use crate::decoder::{self, DecoderOptions};
use crate::encoder::{self, EncoderOptions};
use serde_json::Value;

/// What a caller hands to [`encode_input`]: an already-parsed value tree, or
/// text that might itself be a JSON document.
pub enum EncodeInput {
    Value(Value),
    Text(String),
}

impl From<Value> for EncodeInput {
    fn from(v: Value) -> Self {
        EncodeInput::Value(v)
    }
}

impl From<String> for EncodeInput {
    fn from(s: String) -> Self {
        EncodeInput::Text(s)
    }
}

impl From<&str> for EncodeInput {
    fn from(s: &str) -> Self {
        EncodeInput::Text(s.to_string())
    }
}

/// Façade-level encode options (mirrors `EncoderOptions`; kept as its own
/// type since the façade is a separate entry point per §6).
#[derive(Debug, Clone)]
pub struct FacadeEncodeOptions {
    pub indent: usize,
    pub delimiter: Delimiter,
    pub length_marker: bool,
}

impl Default for FacadeEncodeOptions {
    fn default() -> Self {
        let core = EncoderOptions::default();
        Self {
            indent: core.indent,
            delimiter: core.delimiter,
            length_marker: core.length_marker,
        }
    }
}

/// Façade-level decode options.
#[derive(Debug, Clone)]
pub struct FacadeDecodeOptions {
    pub indent: usize,
    pub delimiter: Delimiter,
    /// When true, return the decoded tree as a pretty-printed JSON string
    /// instead of a value tree (§6).
    pub json: bool,
}

impl Default for FacadeDecodeOptions {
    fn default() -> Self {
        let core = DecoderOptions::default();
        Self {
            indent: core.indent,
            delimiter: core.delimiter,
            json: false,
        }
    }
}

/// What [`decode_input`] hands back: a value tree by default, or — when
/// `options.json` is set — that same tree already serialized as
/// pretty-printed JSON text (§6: "returns a value tree, or (when json=true)
/// that tree serialized as a pretty-printed JSON string").
pub enum DecodeOutput {
    Value(Value),
    Json(String),
}

impl DecodeOutput {
    /// Unwrap the value-tree form; panics if this is the `Json` variant.
    pub fn into_value(self) -> Value {
        match self {
            DecodeOutput::Value(v) => v,
            DecodeOutput::Json(_) => panic!("decode_input produced a JSON string, not a value tree"),
        }
    }
}

/// `encode(input, options)` (§6): if `input` is text whose first
/// non-whitespace character is `{` or `[`, attempt a JSON parse and encode
/// the parsed tree on success; on parse failure, or for any other leading
/// character, encode the original text as a String. A `Value` input is
/// encoded directly.
pub fn encode_input(input: impl Into<EncodeInput>, options: &FacadeEncodeOptions) -> String {
    let value = match input.into() {
        EncodeInput::Value(v) => v,
        EncodeInput::Text(s) => {
            let looks_like_json = matches!(s.trim_start().chars().next(), Some('{') | Some('['));
            if looks_like_json {
                serde_json::from_str(&s).unwrap_or(Value::String(s))
            } else {
                Value::String(s)
            }
        }
    };
    let core_options = EncoderOptions {
        indent: options.indent,
        delimiter: options.delimiter,
        length_marker: options.length_marker,
    };
    encoder::encode(&value, &core_options)
}

/// `decode(toon_text, options)` (§6): decodes `toon_text` and returns the
/// value tree directly, unless `options.json` is set, in which case the
/// tree is serialized as pretty-printed JSON text instead. Propagates
/// `serde_json`'s `Result` on the JSON-string path rather than unwrapping,
/// matching the teacher's discipline of not panicking on a condition a
/// caller could otherwise observe.
pub fn decode_input(
    toon_text: &str,
    options: &FacadeDecodeOptions,
) -> Result<DecodeOutput, serde_json::Error> {
    let core_options = DecoderOptions {
        indent: options.indent,
        delimiter: options.delimiter,
    };
    let value = decoder::decode(toon_text, &core_options);
    if options.json {
        Ok(DecodeOutput::Json(serde_json::to_string_pretty(&value)?))
    } else {
        Ok(DecodeOutput::Value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_value_input() {
        let out = encode_input(json!({"a": 1}), &FacadeEncodeOptions::default());
        assert_eq!(out, "a: 1");
    }

    #[test]
    fn encode_json_text_input_parses_first() {
        let out = encode_input("{\"a\": 1}", &FacadeEncodeOptions::default());
        assert_eq!(out, "a: 1");
    }

    #[test]
    fn encode_malformed_json_text_falls_back_to_string() {
        let out = encode_input("{not json", &FacadeEncodeOptions::default());
        assert_eq!(out, "\"{not json\"");
    }

    #[test]
    fn encode_plain_text_input_is_a_string_scalar() {
        let out = encode_input("hello world", &FacadeEncodeOptions::default());
        assert_eq!(out, "hello world");
    }

    #[test]
    fn decode_default_returns_value_tree() {
        let out = decode_input("name: Alice\nage: 30", &FacadeDecodeOptions::default()).unwrap();
        match out {
            DecodeOutput::Value(v) => assert_eq!(v, json!({"name": "Alice", "age": 30})),
            DecodeOutput::Json(_) => panic!("expected a value tree"),
        }
    }

    #[test]
    fn decode_to_pretty_json() {
        let opts = FacadeDecodeOptions {
            json: true,
            ..FacadeDecodeOptions::default()
        };
        let out = decode_input("name: Alice\nage: 30", &opts).unwrap();
        match out {
            DecodeOutput::Json(s) => {
                let reparsed: Value = serde_json::from_str(&s).unwrap();
                assert_eq!(reparsed, json!({"name": "Alice", "age": 30}));
                assert!(s.contains('\n'));
            }
            DecodeOutput::Value(_) => panic!("expected a JSON string"),
        }
    }
}
