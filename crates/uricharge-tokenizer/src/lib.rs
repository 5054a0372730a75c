//! A tokenizer for URI Charge notation.
//!
//! Input is read through a [`Cursor`], so the same tokenizer (and the parser
//! built on top of it) works over a fully materialized string or over input
//! arriving in chunks.

mod class;
pub use class::{CharClass, classify, is_boundary, is_strict_boundary};

mod cursor;
pub use cursor::{ChunkCursor, Cursor, StrCursor};

mod span;
pub use span::Span;

mod token;
pub use token::{Token, TokenKind};

mod tokenizer;
pub use tokenizer::Tokenizer;
