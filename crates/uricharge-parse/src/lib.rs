//! Parser for URI Charge notation.
//!
//! The [`Parser`] reads a value and drives a [`Receiver`], which decides
//! what the parsed value turns into. Parsing is total: every input yields
//! a value, malformed input degrading to the closest shape.
//!
//! ```
//! use uricharge_parse::{OpaqueRx, Parser};
//!
//! let parsed = Parser::new().parse("foo(bar,baz))tail", &mut OpaqueRx);
//! assert_eq!(parsed.end, 12);
//! ```

pub use uricharge_tokenizer::{ChunkCursor, Cursor, Span, StrCursor};

mod tracing_macros;

mod scalar;
pub use scalar::{Scalar, ScalarKind};

mod decode;
pub use decode::{decode_key, decode_number, decode_scalar, percent_decode};

mod registry;
pub use registry::{DEFAULT_REGISTRY, Registry};

mod receiver;
pub use receiver::{OpaqueRx, Receiver, ValueRx};

mod parser;
pub use parser::{DEFAULT_MAX_DEPTH, Parsed, Parser};
