//! Decoded scalar values.

use std::fmt;

use num_bigint::BigInt;

/// A scalar decoded from a bare token or a registered entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string.
    String(String),
    /// A number.
    Number(f64),
    /// An integer of arbitrary size, written `0n…`.
    BigInt(BigInt),
    /// `!` (true) or `-` (false).
    Bool(bool),
    /// `--`
    Null,
}

/// The type tag of a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Number,
    BigInt,
    Boolean,
    Null,
}

impl Scalar {
    /// The type tag of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Number(_) => ScalarKind::Number,
            Scalar::BigInt(_) => ScalarKind::BigInt,
            Scalar::Bool(_) => ScalarKind::Boolean,
            Scalar::Null => ScalarKind::Null,
        }
    }

    /// The empty string.
    pub fn empty() -> Self {
        Scalar::String(String::new())
    }

    /// Get as a string slice if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a number if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::BigInt => "bigint",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Null => "null",
        })
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<BigInt> for Scalar {
    fn from(n: BigInt) -> Self {
        Scalar::BigInt(n)
    }
}
