//! Positions of tokens in the input.

/// A byte range of the input.
///
/// Offsets count from the start of the whole input, also when it is read in
/// chunks, so a span stays meaningful after its chunk has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span from start and end offsets.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether nothing is covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered text of `input`, if `input` is the whole input and the
    /// span falls on character boundaries.
    pub fn text<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_text() {
        let span = Span::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert_eq!(span.text("a(bcd)"), Some("bcd"));
        assert_eq!(span.text("ab"), None);
        assert_eq!(Span::new(1, 2).text("é"), None);
    }
}
