//! Encoder producing URI Charge notation.
//!
//! This crate provides the escaping rules and the low-level writers for
//! URI Charge output, and the [`ToCharge`] trait implemented by the value
//! trees and common Rust types. The serde integration builds on it.

mod options;
mod scalar;
mod tracing_macros;
mod value_format;
mod writer;

pub use options::{EmptyStyle, EncodeOptions};
pub use scalar::{encode_bigint, encode_key, encode_number, encode_string, escape};
pub use value_format::{ToCharge, encode, encode_list, encode_map, encode_with};
pub use writer::{Encoded, ListWriter, MapWriter, MAX_SAFE_INTEGER, Placement, Shape};

#[cfg(test)]
mod round_trip;
