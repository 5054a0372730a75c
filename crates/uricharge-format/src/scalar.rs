//! Escaping of strings, keys and numbers.

use num_bigint::{BigInt, Sign};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use uricharge_parse::{Scalar, decode_scalar};
use uricharge_tokenizer::classify;

use crate::Placement;

/// Characters escaped in strings and keys. Non-ASCII characters are always
/// escaped as UTF-8.
const ESCAPED: &AsciiSet = &CONTROLS
    // structure
    .add(b'(')
    .add(b')')
    .add(b',')
    .add(b'!')
    .add(b'\'')
    .add(b'$')
    // whitespace
    .add(b' ')
    // unsafe in URIs
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode everything that cannot appear verbatim in a string.
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, ESCAPED).to_string()
}

/// Whether a string starting with this character would not read back as
/// a string if written verbatim.
fn needs_marker(s: &str) -> bool {
    s.chars().next().is_some_and(|c| classify(c).is_leading_marker())
}

/// Encode a string.
///
/// As an entry value or a list item, a string that would be misread gets a
/// leading `'`. At the top level its first character is percent-encoded
/// instead, unless that would read back as a number.
pub fn encode_string(s: &str, placement: Placement) -> String {
    if s.is_empty() {
        return match placement {
            Placement::ListItem => "'".to_string(),
            Placement::Top | Placement::EntryValue => String::new(),
        };
    }

    let escaped = escape(s);
    if !needs_marker(&escaped) {
        return escaped;
    }
    match placement {
        Placement::EntryValue | Placement::ListItem => format!("'{escaped}"),
        Placement::Top => {
            let mut chars = escaped.chars();
            let first = chars.next().map(u32::from).unwrap_or_default();
            let candidate = format!("%{first:02X}{}", chars.as_str());
            if decode_scalar(&candidate) == Scalar::String(s.to_owned()) {
                candidate
            } else {
                format!("'{escaped}")
            }
        }
    }
}

/// Encode a map key.
///
/// Keys that would be read as something else get a leading `$`.
pub fn encode_key(key: &str) -> String {
    let escaped = escape(key);
    if key.is_empty() || key.starts_with(['$', '!', '\'']) {
        format!("${escaped}")
    } else {
        escaped
    }
}

/// Encode a number. Non-finite numbers are written as entities.
pub fn encode_number(n: f64) -> String {
    if n.is_nan() {
        "!NaN".to_string()
    } else if n == f64::INFINITY {
        "!Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "!-Infinity".to_string()
    } else {
        n.to_string()
    }
}

/// Encode a bigint as `0n<digits>`.
pub fn encode_bigint(n: &BigInt) -> String {
    match n.sign() {
        Sign::Minus => format!("-0n{}", n.magnitude()),
        Sign::NoSign | Sign::Plus => format!("0n{}", n.magnitude()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain-text_1.2~"), "plain-text_1.2~");
        assert_eq!(escape("a b"), "a%20b");
        assert_eq!(escape("f(x,y)"), "f%28x%2Cy%29");
        assert_eq!(escape("!$'"), "%21%24%27");
        assert_eq!(escape("a+b=c&d"), "a%2Bb%3Dc%26d");
        assert_eq!(escape("50%"), "50%25");
        assert_eq!(escape("tab\tnl\n"), "tab%09nl%0A");
        assert_eq!(escape("café"), "caf%C3%A9");
        assert_eq!(escape("a:b;c@d*"), "a:b;c@d*");
    }

    #[test]
    fn test_string_markers_by_placement() {
        assert_eq!(encode_string("-test", Placement::EntryValue), "'-test");
        assert_eq!(encode_string("-test", Placement::ListItem), "'-test");
        assert_eq!(encode_string("-test", Placement::Top), "%2Dtest");
        assert_eq!(encode_string("123", Placement::EntryValue), "'123");
        assert_eq!(encode_string("123", Placement::Top), "'123");
        assert_eq!(encode_string("1x", Placement::Top), "%31x");
        assert_eq!(encode_string("-", Placement::Top), "%2D");
        assert_eq!(encode_string("--", Placement::Top), "%2D-");
        assert_eq!(encode_string("-1", Placement::Top), "'-1");
        assert_eq!(encode_string("!x", Placement::Top), "%21x");
        assert_eq!(encode_string("text", Placement::Top), "text");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_string("", Placement::Top), "");
        assert_eq!(encode_string("", Placement::EntryValue), "");
        assert_eq!(encode_string("", Placement::ListItem), "'");
    }

    #[test]
    fn test_keys() {
        assert_eq!(encode_key("foo"), "foo");
        assert_eq!(encode_key(""), "$");
        assert_eq!(encode_key("$x"), "$%24x");
        assert_eq!(encode_key("!x"), "$%21x");
        assert_eq!(encode_key("'x"), "$%27x");
        assert_eq!(encode_key("a b"), "a%20b");
        assert_eq!(encode_key("-1"), "-1");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(encode_number(0.0), "0");
        assert_eq!(encode_number(-0.0), "-0");
        assert_eq!(encode_number(1.5), "1.5");
        assert_eq!(encode_number(-42.0), "-42");
        assert_eq!(encode_number(f64::NAN), "!NaN");
        assert_eq!(encode_number(f64::INFINITY), "!Infinity");
        assert_eq!(encode_number(f64::NEG_INFINITY), "!-Infinity");
        assert_eq!(encode_bigint(&BigInt::from(123)), "0n123");
        assert_eq!(encode_bigint(&BigInt::from(-7)), "-0n7");
        assert_eq!(encode_bigint(&BigInt::from(0)), "0n0");
    }
}
