//! # toon_codec
//!
//! A bidirectional JSON ⟷ TOON converter.
//!
//! TOON (Token-Oriented Object Notation) is a line-oriented, indentation-based
//! format that represents JSON-like data with minimal quoting and a compact
//! tabular shape for uniform arrays of records.
//!
//! This crate provides the core encoder/decoder pair (`encode`/`decode`,
//! operating on `serde_json::Value`), plus a thin façade (`facade` module)
//! that mirrors how a host would typically call into it: JSON-or-literal
//! detection on the way in, optional pretty-JSON output on the way out.
//!
//! ## Example
//!
//! ```rust
//! use toon_codec::{encode, decode, EncoderOptions, DecoderOptions};
//! use serde_json::json;
//!
//! let data = json!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["admin", "user"]
//! });
//!
//! let toon = encode(&data, &EncoderOptions::default());
//! println!("{}", toon);
//!
//! let decoded = decode(&toon, &DecoderOptions::default());
//! assert_eq!(data, decoded);
//! ```

mod common;
mod decoder;
mod encoder;
mod facade;
mod scalar;

pub use common::Delimiter;
pub use decoder::{decode, DecoderOptions};
pub use encoder::{encode, EncoderOptions};
pub use facade::{decode_input, encode_input, DecodeOutput, FacadeDecodeOptions, FacadeEncodeOptions};
