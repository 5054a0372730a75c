//! Token types for the URI Charge tokenizer.

use std::borrow::Cow;

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// A run of in-line whitespace.
    Whitespace,
    /// A run of whitespace containing `\n` or `\r`.
    Newline,
    /// A run of characters that are neither boundaries nor whitespace.
    Text,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Whether this token is whitespace of either kind.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

/// A token with its kind, span, and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the input.
    pub span: Span,
    /// The text of this token, borrowed when the input allows it.
    pub text: Cow<'src, str>,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: Cow<'src, str>) -> Self {
        Self { kind, span, text }
    }
}
