//! Encoding options.

/// How empty lists and maps are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStyle {
    /// `,` for an empty list (`(,)` as a list item), `$` for an empty map.
    #[default]
    Compact,
    /// `!!` for an empty list, `!()` for an empty map.
    Legacy,
}

/// Options for encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// How empty lists and maps are written (default: compact).
    pub empty_style: EmptyStyle,
}

impl EncodeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write empty containers as `!!` and `!()`.
    pub fn legacy(mut self) -> Self {
        self.empty_style = EmptyStyle::Legacy;
        self
    }

    /// Write empty containers as `,` and `$`.
    pub fn compact(mut self) -> Self {
        self.empty_style = EmptyStyle::Compact;
        self
    }
}
