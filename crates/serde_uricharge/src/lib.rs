//! Serde support for URI Charge notation.
//!
//! This crate provides URI Charge serialization and deserialization using
//! serde.
//!
//! # Deserialization Example
//!
//! ```
//! use serde::Deserialize;
//! use serde_uricharge::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Query {
//!     search: String,
//!     page: u32,
//! }
//!
//! let query: Query = from_str("search(rust%20book)page(2)").unwrap();
//! assert_eq!(query.search, "rust book");
//! assert_eq!(query.page, 2);
//! ```
//!
//! # Serialization Example
//!
//! ```
//! use serde::Serialize;
//! use serde_uricharge::to_string;
//!
//! #[derive(Serialize)]
//! struct Query {
//!     search: String,
//!     page: u32,
//! }
//!
//! let query = Query { search: "rust book".into(), page: 2 };
//! assert_eq!(to_string(&query).unwrap(), "search(rust%20book)page(2)");
//! ```

mod de;
mod error;
mod ser;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use ser::{MapSerializer, SeqSerializer, Serializer};
pub use uricharge_format::{EmptyStyle, EncodeOptions, Placement};
pub use uricharge_tree::Value;

/// Deserialize a value from URI Charge text.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    from_value(uricharge_tree::parse(s))
}

/// Deserialize a value from a parsed [`Value`].
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// Serialize a value to URI Charge text.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: serde::ser::Serialize + ?Sized,
{
    to_string_with_options(value, Placement::Top, &EncodeOptions::default())
}

/// Serialize a value to URI Charge text for `placement`, with custom
/// options.
///
/// # Example
///
/// ```
/// use serde_uricharge::{EncodeOptions, Placement, to_string_with_options};
///
/// let empty: Vec<u32> = Vec::new();
/// let legacy = EncodeOptions::new().legacy();
/// assert_eq!(to_string_with_options(&empty, Placement::Top, &legacy).unwrap(), "!!");
/// assert_eq!(to_string_with_options("-1", Placement::ListItem, &legacy).unwrap(), "'-1");
/// ```
pub fn to_string_with_options<T>(
    value: &T,
    placement: Placement,
    options: &EncodeOptions,
) -> Result<String>
where
    T: serde::ser::Serialize + ?Sized,
{
    let encoded = value.serialize(Serializer::new(placement, options))?;
    Ok(encoded.text)
}
