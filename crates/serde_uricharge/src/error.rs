//! Error types for serde_uricharge.

use std::fmt;

/// Error type for serde_uricharge operations.
///
/// Deserialization errors remember where in the value they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    /// Innermost segment first.
    path: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

impl Error {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            path: Vec::new(),
        }
    }

    pub(crate) fn custom(msg: impl fmt::Display) -> Self {
        Self::new(msg.to_string())
    }

    /// Record that this error happened in the entry `key`.
    pub(crate) fn in_key(mut self, key: &str) -> Self {
        self.path.push(Segment::Key(key.to_string()));
        self
    }

    /// Record that this error happened in the list item `index`.
    pub(crate) fn in_item(mut self, index: usize) -> Self {
        self.path.push(Segment::Index(index));
        self
    }

    /// The error message, without the location.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Where the error happened, like `user.tags[2]`. Empty at the top level.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in self.path.iter().rev() {
            match segment {
                Segment::Key(key) => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(key);
                }
                Segment::Index(index) => path.push_str(&format!("[{index}]")),
            }
        }
        path
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)?;
        if !self.path.is_empty() {
            write!(f, " at `{}`", self.path())?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

/// Result type for serde_uricharge operations.
pub type Result<T> = std::result::Result<T, Error>;
