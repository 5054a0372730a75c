//! Cursors over URI Charge input.

use std::borrow::Cow;

/// Remaining input of a parse.
///
/// The tokenizer and the parser only ever talk to input through this trait,
/// so the grammar is written once for every input mode.
pub trait Cursor<'src> {
    /// Byte offset of the next unconsumed character.
    fn position(&self) -> usize;

    /// Peek at the next character without consuming it.
    fn peek(&mut self) -> Option<char>;

    /// Byte length of the run before the next character matching `stop`, or
    /// of all remaining input if there is none.
    fn search<F: FnMut(char) -> bool>(&mut self, stop: F) -> usize;

    /// Consume `len` bytes and return them.
    ///
    /// `len` must lie on a character boundary within the input reported by
    /// [`Cursor::search`] or [`Cursor::peek`].
    fn take(&mut self, len: usize) -> Cow<'src, str>;

    /// Check if all input has been consumed.
    fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }
}

/// A cursor over a fully materialized string. Consumed text is borrowed.
#[derive(Debug, Clone)]
pub struct StrCursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> StrCursor<'src> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// The unconsumed remainder of the input.
    #[inline]
    pub fn remaining(&self) -> &'src str {
        &self.source[self.pos..]
    }
}

impl<'src> Cursor<'src> for StrCursor<'src> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&mut self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn search<F: FnMut(char) -> bool>(&mut self, stop: F) -> usize {
        let remaining = self.remaining();
        remaining.find(stop).unwrap_or(remaining.len())
    }

    fn take(&mut self, len: usize) -> Cow<'src, str> {
        let text = &self.source[self.pos..self.pos + len];
        self.pos += len;
        Cow::Borrowed(text)
    }
}

/// Buffered bytes are compacted once this many of them have been consumed.
const COMPACT_THRESHOLD: usize = 4096;

/// A cursor pulling input chunks from an iterator as it needs them.
///
/// More input is requested only when a peek or a search runs off the end of
/// what is buffered. Consumed text is owned.
#[derive(Debug)]
pub struct ChunkCursor<I> {
    chunks: I,
    buffer: String,
    /// Offset of the next unconsumed byte in `buffer`.
    offset: usize,
    /// Bytes dropped from the front of `buffer` so far.
    dropped: usize,
    exhausted: bool,
}

impl<I, S> ChunkCursor<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    /// Create a cursor reading chunks from `chunks`.
    pub fn new(chunks: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            chunks: chunks.into_iter(),
            buffer: String::new(),
            offset: 0,
            dropped: 0,
            exhausted: false,
        }
    }

    /// Pull the next chunk into the buffer. Returns false once input ends.
    fn fill(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        match self.chunks.next() {
            Some(chunk) => {
                self.buffer.push_str(&chunk.into());
                true
            }
            None => {
                self.exhausted = true;
                false
            }
        }
    }

    fn compact(&mut self) {
        if self.offset >= COMPACT_THRESHOLD && self.offset * 2 > self.buffer.len() {
            self.buffer.drain(..self.offset);
            self.dropped += self.offset;
            self.offset = 0;
        }
    }
}

impl<'src, I, S> Cursor<'src> for ChunkCursor<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    #[inline]
    fn position(&self) -> usize {
        self.dropped + self.offset
    }

    fn peek(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.buffer[self.offset..].chars().next() {
                return Some(c);
            }
            if !self.fill() {
                return None;
            }
        }
    }

    fn search<F: FnMut(char) -> bool>(&mut self, mut stop: F) -> usize {
        let mut from = self.offset;
        loop {
            if let Some(found) = self.buffer[from..].find(&mut stop) {
                return from + found - self.offset;
            }
            from = self.buffer.len();
            if !self.fill() {
                return self.buffer.len() - self.offset;
            }
        }
    }

    fn take(&mut self, len: usize) -> Cow<'src, str> {
        let text = self.buffer[self.offset..self.offset + len].to_owned();
        self.offset += len;
        self.compact();
        Cow::Owned(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn drain<'src>(cursor: &mut impl Cursor<'src>) -> Vec<String> {
        let mut runs = Vec::new();
        while !cursor.is_eof() {
            let len = cursor.search(|c| c == ',');
            runs.push(cursor.take(len).into_owned());
            if cursor.peek() == Some(',') {
                cursor.take(1);
            }
        }
        runs
    }

    #[test]
    fn test_str_cursor() {
        let mut cursor = StrCursor::new("foo,bar");
        assert_eq!(cursor.peek(), Some('f'));
        assert_eq!(cursor.search(|c| c == ','), 3);
        assert!(matches!(cursor.take(3), Cow::Borrowed("foo")));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), ",bar");
        assert_eq!(drain(&mut cursor), vec!["", "bar"]);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_chunk_cursor_searches_across_chunks() {
        let mut cursor = ChunkCursor::new(vec!["fo", "", "o(b", "ar"]);
        assert_eq!(cursor.search(|c| c == '('), 3);
        assert_eq!(cursor.take(3), "foo");
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.peek(), Some('('));
        cursor.take(1);
        assert_eq!(cursor.search(|c| c == ')'), 3);
        assert_eq!(cursor.take(3), "bar");
        assert!(cursor.is_eof());
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_chunk_cursor_matches_str_cursor() {
        let input = "a,bb,,ccc,dddd";
        let chunks: Vec<String> = input.chars().map(String::from).collect();
        let from_str = drain(&mut StrCursor::new(input));
        let from_chunks = drain(&mut ChunkCursor::new(chunks));
        assert_eq!(from_str, from_chunks);
    }

    #[test]
    fn test_chunk_cursor_compacts_long_input() {
        let chunk = "x".repeat(1000);
        let mut cursor = ChunkCursor::new(std::iter::repeat_n(chunk, 10));
        let mut total = 0;
        while !cursor.is_eof() {
            let len = cursor.search(|_| false).min(700);
            total += cursor.take(len).len();
        }
        assert_eq!(total, 10_000);
        assert_eq!(cursor.position(), 10_000);
    }
}
