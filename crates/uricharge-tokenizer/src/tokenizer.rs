//! Tokenizer for URI Charge notation.

use std::borrow::Cow;

use crate::{Cursor, Span, StrCursor, Token, TokenKind, is_boundary};
use tracing::trace;

/// A tokenizer producing tokens from a [`Cursor`], with one token of
/// lookahead.
#[derive(Clone)]
pub struct Tokenizer<'src, C> {
    cursor: C,
    /// A token that has been peeked but not consumed.
    pending: Option<Token<'src>>,
}

impl<'src> Tokenizer<'src, StrCursor<'src>> {
    /// Create a tokenizer over a fully materialized string.
    pub fn for_str(source: &'src str) -> Self {
        Self::new(StrCursor::new(source))
    }
}

impl<'src, C: Cursor<'src>> Tokenizer<'src, C> {
    /// Create a tokenizer reading from `cursor`.
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            pending: None,
        }
    }

    /// Byte offset of the next unconsumed token.
    #[inline]
    pub fn position(&self) -> usize {
        match &self.pending {
            Some(token) => token.span.start,
            None => self.cursor.position(),
        }
    }

    /// Check if we're at the end of input.
    pub fn is_eof(&mut self) -> bool {
        self.peek_token().kind == TokenKind::Eof
    }

    /// Peek at the next token without consuming it.
    pub fn peek_token(&mut self) -> &Token<'src> {
        let token = match self.pending.take() {
            Some(token) => token,
            None => self.read_token(),
        };
        self.pending.insert(token)
    }

    /// Kind of the next token.
    #[inline]
    pub fn peek_kind(&mut self) -> TokenKind {
        self.peek_token().kind
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        match self.pending.take() {
            Some(token) => token,
            None => self.read_token(),
        }
    }

    /// Consume whitespace tokens. Returns true if any of them broke the line.
    pub fn skip_trivia(&mut self) -> bool {
        let mut newline = false;
        while self.peek_kind().is_trivia() {
            newline |= self.next_token().kind == TokenKind::Newline;
        }
        newline
    }

    fn token(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let start = self.cursor.position();
        let text = if len == 0 {
            Cow::Borrowed("")
        } else {
            self.cursor.take(len)
        };
        let span = Span::new(start, start + len);
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    fn read_token(&mut self) -> Token<'src> {
        let Some(c) = self.cursor.peek() else {
            return self.token(TokenKind::Eof, 0);
        };

        match c {
            '(' => self.token(TokenKind::LParen, 1),
            ')' => self.token(TokenKind::RParen, 1),
            ',' => self.token(TokenKind::Comma, 1),
            c if c.is_ascii_whitespace() => {
                let len = self.cursor.search(|c| !c.is_ascii_whitespace());
                let mut token = self.token(TokenKind::Whitespace, len);
                if token.text.contains(['\n', '\r']) {
                    token.kind = TokenKind::Newline;
                }
                token
            }
            _ => {
                let len = self
                    .cursor
                    .search(|c| is_boundary(c) || c.is_ascii_whitespace());
                self.token(TokenKind::Text, len)
            }
        }
    }
}

impl<'src, C: Cursor<'src>> Iterator for Tokenizer<'src, C> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkCursor;
    use facet_testhelpers::test;

    fn tokenize(source: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::for_str(source)
            .map(|t| (t.kind, t.text.into_owned()))
            .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(kinds("("), vec![TokenKind::LParen]);
        assert_eq!(kinds(")"), vec![TokenKind::RParen]);
        assert_eq!(kinds(","), vec![TokenKind::Comma]);
        assert_eq!(kinds(""), vec![]);
    }

    #[test]
    fn test_text() {
        assert_eq!(
            tokenize("foo%20bar!$'"),
            vec![(TokenKind::Text, "foo%20bar!$'".to_string())]
        );
        assert_eq!(
            tokenize("héllo"),
            vec![(TokenKind::Text, "héllo".to_string())]
        );
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(kinds("  \t"), vec![TokenKind::Whitespace]);
        assert_eq!(kinds(" \n "), vec![TokenKind::Newline]);
        assert_eq!(kinds("\r\n"), vec![TokenKind::Newline]);
    }

    #[test]
    fn test_mixed() {
        let tokens = tokenize("foo (bar,baz)\nqux");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Text, "foo".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::LParen, "(".to_string()),
                (TokenKind::Text, "bar".to_string()),
                (TokenKind::Comma, ",".to_string()),
                (TokenKind::Text, "baz".to_string()),
                (TokenKind::RParen, ")".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Text, "qux".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let spans: Vec<Span> = Tokenizer::for_str("ab(c)").map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2),
                Span::new(2, 3),
                Span::new(3, 4),
                Span::new(4, 5)
            ]
        );
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut tokenizer = Tokenizer::for_str("a,b");
        assert_eq!(tokenizer.peek_kind(), TokenKind::Text);
        assert_eq!(tokenizer.position(), 0);
        assert_eq!(tokenizer.next_token().text, "a");
        assert_eq!(tokenizer.position(), 1);
        assert_eq!(tokenizer.peek_kind(), TokenKind::Comma);
        assert_eq!(tokenizer.position(), 1);
    }

    #[test]
    fn test_skip_trivia_reports_newlines() {
        let mut tokenizer = Tokenizer::for_str("  x \n y");
        assert!(!tokenizer.skip_trivia());
        tokenizer.next_token();
        assert!(tokenizer.skip_trivia());
        assert_eq!(tokenizer.next_token().text, "y");
        assert!(tokenizer.is_eof());
    }

    #[test]
    fn test_chunked_input_yields_same_tokens() {
        let source = "foo(bar  baz,'q(1))\n!x";
        let chunks: Vec<String> = source
            .as_bytes()
            .chunks(3)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect();
        let chunked: Vec<(TokenKind, String)> = Tokenizer::new(ChunkCursor::new(chunks))
            .map(|t| (t.kind, t.text.into_owned()))
            .collect();
        assert_eq!(chunked, tokenize(source));
    }
}
