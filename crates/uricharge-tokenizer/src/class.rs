//! Character classes of URI Charge notation.

/// The structural role of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
    /// ASCII whitespace other than line breaks.
    Whitespace,
    /// `\n` or `\r`.
    Newline,
    /// `'` (quoted string marker when leading)
    Apostrophe,
    /// `!` (entity, directive or `true` when leading)
    Exclamation,
    /// `$` (explicit map key when leading)
    Dollar,
    /// `-` (negative number, `false` or `null` when leading)
    Hyphen,
    /// `0`-`9`
    Digit,
    /// Anything else.
    Other,
}

impl CharClass {
    /// Whether this class is a structural bound: a parenthesis or a comma.
    #[inline]
    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            CharClass::OpenParen | CharClass::CloseParen | CharClass::Comma
        )
    }

    /// Whether a token starting with this class needs a marker to be read as
    /// a plain string.
    #[inline]
    pub fn is_leading_marker(self) -> bool {
        matches!(
            self,
            CharClass::Apostrophe
                | CharClass::Exclamation
                | CharClass::Dollar
                | CharClass::Hyphen
                | CharClass::Digit
        )
    }
}

/// Classify a character.
#[inline]
pub fn classify(c: char) -> CharClass {
    match c {
        '(' => CharClass::OpenParen,
        ')' => CharClass::CloseParen,
        ',' => CharClass::Comma,
        '\n' | '\r' => CharClass::Newline,
        c if c.is_ascii_whitespace() => CharClass::Whitespace,
        '\'' => CharClass::Apostrophe,
        '!' => CharClass::Exclamation,
        '$' => CharClass::Dollar,
        '-' => CharClass::Hyphen,
        '0'..='9' => CharClass::Digit,
        _ => CharClass::Other,
    }
}

/// Check if a character is a structural bound: `(`, `)` or `,`.
#[inline]
pub fn is_boundary(c: char) -> bool {
    classify(c).is_boundary()
}

/// Like [`is_boundary`], but an opening parenthesis separated from the
/// preceding token by a line break does not count.
///
/// Arguments must follow their key immediately: `foo (bar)` opens an entry,
/// `foo⏎(bar)` does not.
#[inline]
pub fn is_strict_boundary(c: char, after_newline: bool) -> bool {
    match classify(c) {
        CharClass::OpenParen => !after_newline,
        class => class.is_boundary(),
    }
}
