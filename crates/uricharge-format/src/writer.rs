//! Low-level URI Charge output writer.
//!
//! Values are encoded bottom-up: each child is encoded for the placement it
//! ends up in, and containers join the encoded children.

use num_bigint::BigInt;

use crate::options::{EmptyStyle, EncodeOptions};
use crate::scalar::{encode_bigint, encode_key, encode_number, encode_string};
#[allow(unused_imports)]
use crate::trace;

/// Largest integer an `f64` holds exactly.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Where an encoded value ends up. Escaping depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The whole input.
    Top,
    /// Inside the parentheses of a map entry.
    EntryValue,
    /// An item of a list.
    ListItem,
}

/// The shape of an encoded value, as far as its container cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A scalar, entity or directive.
    Scalar,
    /// An empty list or map written as a single token.
    Empty,
    /// A non-empty list, or an empty one in parentheses.
    List,
    /// A non-empty map.
    Map,
    /// Nothing: skipped in maps, `--` anywhere else.
    Absent,
}

/// An encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The text.
    pub text: String,
    /// The shape.
    pub shape: Shape,
}

impl Encoded {
    fn scalar(text: String) -> Self {
        Self {
            text,
            shape: Shape::Scalar,
        }
    }

    /// Encode a string.
    pub fn string(s: &str, placement: Placement) -> Self {
        Self::scalar(encode_string(s, placement))
    }

    /// Encode a number.
    pub fn number(n: f64) -> Self {
        Self::scalar(encode_number(n))
    }

    /// Encode a bigint.
    pub fn bigint(n: &BigInt) -> Self {
        Self::scalar(encode_bigint(n))
    }

    /// Encode an integer, as a bigint where a number would lose precision.
    pub fn integer(n: i128) -> Self {
        if n.unsigned_abs() <= u128::from(MAX_SAFE_INTEGER) {
            Self::number(n as f64)
        } else {
            Self::bigint(&BigInt::from(n))
        }
    }

    /// Encode a boolean as `!` or `-`.
    pub fn bool(b: bool) -> Self {
        Self::scalar(if b { "!" } else { "-" }.to_string())
    }

    /// Encode null as `--`.
    pub fn null() -> Self {
        Self::scalar("--".to_string())
    }

    /// An absent value.
    pub fn absent() -> Self {
        Self {
            text: "--".to_string(),
            shape: Shape::Absent,
        }
    }

    /// Encode an entity. `raw` is written as is.
    pub fn entity(raw: &str) -> Self {
        Self::scalar(raw.to_string())
    }

    /// Encode a directive from its arguments, each encoded as a
    /// [`Placement::ListItem`].
    pub fn directive(name: &str, args: impl IntoIterator<Item = Encoded>) -> Self {
        let args: Vec<String> = args.into_iter().map(|arg| arg.text).collect();
        Self::scalar(format!("!{name}({})", args.join(",")))
    }

    /// Whether this is the empty string.
    fn is_empty_string(&self) -> bool {
        self.shape == Shape::Scalar && self.text.is_empty()
    }
}

/// Writer joining list items.
#[derive(Debug)]
pub struct ListWriter<'o> {
    placement: Placement,
    options: &'o EncodeOptions,
    items: Vec<Encoded>,
}

impl<'o> ListWriter<'o> {
    /// Start a list to be written at `placement`.
    pub fn new(placement: Placement, options: &'o EncodeOptions) -> Self {
        Self {
            placement,
            options,
            items: Vec::new(),
        }
    }

    /// Add an item encoded as a [`Placement::ListItem`].
    pub fn push(&mut self, item: Encoded) {
        self.items.push(item);
    }

    /// Finish the list.
    pub fn finish(self) -> Encoded {
        let legacy = self.options.empty_style == EmptyStyle::Legacy;
        if self.items.is_empty() {
            let (text, shape) = match (legacy, self.placement) {
                (true, _) => ("!!", Shape::Empty),
                (false, Placement::ListItem) => ("(,)", Shape::List),
                (false, Placement::Top | Placement::EntryValue) => (",", Shape::Empty),
            };
            return Encoded {
                text: text.to_string(),
                shape,
            };
        }

        let parenthesized = self.placement == Placement::ListItem;
        let trailing_comma =
            !parenthesized && self.items.len() == 1 && self.items[0].shape != Shape::List;
        let items: Vec<String> = self.items.into_iter().map(|item| item.text).collect();
        let mut text = items.join(",");
        if parenthesized {
            text = format!("({text})");
        } else if trailing_comma {
            text.push(',');
        }
        trace!("Encoded list {:?}", text);
        Encoded {
            text,
            shape: Shape::List,
        }
    }
}

/// Writer joining map entries.
#[derive(Debug)]
pub struct MapWriter<'o> {
    options: &'o EncodeOptions,
    entries: Vec<(String, Encoded)>,
}

impl<'o> MapWriter<'o> {
    /// Start a map. Maps read the same wherever they are placed.
    pub fn new(options: &'o EncodeOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    /// Add an entry whose value is encoded as a [`Placement::EntryValue`].
    /// Absent values are skipped.
    pub fn entry(&mut self, key: &str, value: Encoded) {
        if value.shape != Shape::Absent {
            self.entries.push((encode_key(key), value));
        }
    }

    /// Finish the map.
    pub fn finish(self) -> Encoded {
        if self.entries.is_empty() {
            let text = match self.options.empty_style {
                EmptyStyle::Compact => "$",
                EmptyStyle::Legacy => "!()",
            };
            return Encoded {
                text: text.to_string(),
                shape: Shape::Empty,
            };
        }

        let count = self.entries.len();
        let mut text = String::new();
        for (i, (key, value)) in self.entries.into_iter().enumerate() {
            text.push_str(&key);
            if value.is_empty_string() {
                if i + 1 == count && count > 1 {
                    // bare suffix
                } else if key == "$" {
                    text.push_str("(')");
                } else {
                    text.push_str("()");
                }
            } else {
                text.push('(');
                text.push_str(&value.text);
                text.push(')');
            }
        }
        trace!("Encoded map {:?}", text);
        Encoded {
            text,
            shape: Shape::Map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn list(placement: Placement, options: &EncodeOptions, items: Vec<Encoded>) -> String {
        let mut writer = ListWriter::new(placement, options);
        for item in items {
            writer.push(item);
        }
        writer.finish().text
    }

    #[test]
    fn test_lists() {
        let options = EncodeOptions::default();
        let items = || vec![Encoded::number(1.0), Encoded::string("a", Placement::ListItem)];
        assert_eq!(list(Placement::Top, &options, items()), "1,a");
        assert_eq!(list(Placement::EntryValue, &options, items()), "1,a");
        assert_eq!(list(Placement::ListItem, &options, items()), "(1,a)");
        assert_eq!(
            list(Placement::Top, &options, vec![Encoded::number(1.0)]),
            "1,"
        );
        assert_eq!(
            list(Placement::Top, &options, vec![Encoded::absent()]),
            "--,"
        );
    }

    #[test]
    fn test_one_item_list_of_list_has_no_trailing_comma() {
        let options = EncodeOptions::default();
        let inner = list(Placement::ListItem, &options, vec![Encoded::number(1.0)]);
        let inner = Encoded {
            text: inner,
            shape: Shape::List,
        };
        assert_eq!(list(Placement::Top, &options, vec![inner]), "(1)");
    }

    #[test]
    fn test_empty_lists() {
        let compact = EncodeOptions::new();
        let legacy = EncodeOptions::new().legacy();
        assert_eq!(list(Placement::Top, &compact, vec![]), ",");
        assert_eq!(list(Placement::EntryValue, &compact, vec![]), ",");
        assert_eq!(list(Placement::ListItem, &compact, vec![]), "(,)");
        assert_eq!(list(Placement::Top, &legacy, vec![]), "!!");
        assert_eq!(list(Placement::ListItem, &legacy, vec![]), "!!");

        let empty = ListWriter::new(Placement::ListItem, &legacy).finish();
        assert_eq!(list(Placement::Top, &legacy, vec![empty]), "!!,");
    }

    #[test]
    fn test_maps() {
        let options = EncodeOptions::default();
        let mut map = MapWriter::new(&options);
        map.entry("a", Encoded::number(1.0));
        map.entry("skip", Encoded::absent());
        map.entry("b", Encoded::string("", Placement::EntryValue));
        assert_eq!(map.finish().text, "a(1)b");

        let mut map = MapWriter::new(&options);
        map.entry("a", Encoded::string("", Placement::EntryValue));
        assert_eq!(map.finish().text, "a()");

        let mut map = MapWriter::new(&options);
        map.entry("", Encoded::string("", Placement::EntryValue));
        assert_eq!(map.finish().text, "$(')");

        let mut map = MapWriter::new(&options);
        map.entry("a", Encoded::string("", Placement::EntryValue));
        map.entry("b", Encoded::bool(true));
        assert_eq!(map.finish().text, "a()b(!)");
    }

    #[test]
    fn test_empty_maps() {
        assert_eq!(MapWriter::new(&EncodeOptions::new()).finish().text, "$");
        assert_eq!(
            MapWriter::new(&EncodeOptions::new().legacy()).finish().text,
            "!()"
        );
    }

    #[test]
    fn test_integers() {
        let max = i128::from(MAX_SAFE_INTEGER);
        assert_eq!(Encoded::integer(42).text, "42");
        assert_eq!(Encoded::integer(-max).text, "-9007199254740991");
        assert_eq!(Encoded::integer(max + 1).text, "0n9007199254740992");
        assert_eq!(Encoded::integer(-max - 1).text, "-0n9007199254740992");
    }

        #[test]
    fn test_directive() {
        let args = [Encoded::string("a", Placement::ListItem), Encoded::null()];
        assert_eq!(Encoded::directive("d", args).text, "!d(a,--)");
        assert_eq!(Encoded::directive("d", []).text, "!d()");
    }
}
