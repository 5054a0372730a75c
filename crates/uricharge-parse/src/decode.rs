//! Decoding of bare tokens into scalars.

use num_bigint::BigInt;
use percent_encoding::percent_decode_str;

use crate::Scalar;

/// Percent-decode `text`.
///
/// Invalid escapes are kept verbatim and invalid UTF-8 is replaced, so this
/// never fails. `+` is a literal plus sign.
pub fn percent_decode(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Decode a bare token into a scalar.
///
/// Surrounding whitespace is ignored. Tokens starting with `!` are entities
/// resolved by the parser; here `!` alone is `true` and anything longer is
/// an ordinary string.
pub fn decode_scalar(raw: &str) -> Scalar {
    let raw = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    match raw {
        "" => return Scalar::empty(),
        "!" => return Scalar::Bool(true),
        "-" => return Scalar::Bool(false),
        "--" => return Scalar::Null,
        _ => {}
    }

    if let Some(quoted) = raw.strip_prefix('\'') {
        return Scalar::String(percent_decode(quoted));
    }
    if let Some(number) = decode_number(raw) {
        return number;
    }
    let decoded = percent_decode(raw);
    if raw.starts_with('%')
        && let Some(number) = decode_number(&decoded)
    {
        return number;
    }
    Scalar::String(decoded)
}

/// Decode a map key: strip one leading `$`, then percent-decode.
pub fn decode_key(raw: &str) -> String {
    let raw = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    percent_decode(raw.strip_prefix('$').unwrap_or(raw))
}

/// Decode `text` if the whole of it matches the numeric grammar.
///
/// Accepts an optional `-` followed by `0n<digits>` (bigint), `0b<binary>`,
/// `0x<hex>` or a decimal with optional fraction and exponent. The bare
/// prefixes `0n`, `0b` and `0x` are zero.
pub fn decode_number(text: &str) -> Option<Scalar> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    if let Some(digits) = unsigned.strip_prefix("0n") {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = if digits.is_empty() {
            BigInt::from(0u8)
        } else {
            BigInt::parse_bytes(digits.as_bytes(), 10)?
        };
        return Some(Scalar::BigInt(if negative { -value } else { value }));
    }

    let radix = if unsigned.starts_with("0b") {
        Some(2)
    } else if unsigned.starts_with("0x") {
        Some(16)
    } else {
        None
    };
    if let Some(radix) = radix {
        let value = unsigned[2..].chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })?;
        return Some(Scalar::Number(if negative { -value } else { value }));
    }

    if !is_decimal(unsigned) {
        return None;
    }
    text.parse::<f64>().ok().map(Scalar::Number)
}

/// `digits[.digits*][(e|E)[+|-]digits]`
fn is_decimal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    if !digits(&mut i) {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        digits(&mut i);
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarKind;
    use facet_testhelpers::test;

    fn string(s: &str) -> Scalar {
        Scalar::String(s.to_string())
    }

    #[test]
    fn test_special_tokens() {
        assert_eq!(decode_scalar(""), string(""));
        assert_eq!(decode_scalar("!"), Scalar::Bool(true));
        assert_eq!(decode_scalar("-"), Scalar::Bool(false));
        assert_eq!(decode_scalar("--"), Scalar::Null);
        assert_eq!(decode_scalar("  --  "), Scalar::Null);
    }

    #[test]
    fn test_quoted() {
        assert_eq!(decode_scalar("'"), string(""));
        assert_eq!(decode_scalar("'123"), string("123"));
        assert_eq!(decode_scalar("'-test"), string("-test"));
        assert_eq!(decode_scalar("'%27a%20b"), string("'a b"));
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(decode_scalar("0"), Scalar::Number(0.0));
        assert_eq!(decode_scalar("123"), Scalar::Number(123.0));
        assert_eq!(decode_scalar("-1.5"), Scalar::Number(-1.5));
        assert_eq!(decode_scalar("1.5e3"), Scalar::Number(1500.0));
        assert_eq!(decode_scalar("2E-2"), Scalar::Number(0.02));
        assert_eq!(decode_scalar("7."), Scalar::Number(7.0));
    }

    #[test]
    fn test_negative_zero() {
        let Scalar::Number(n) = decode_scalar("-0") else {
            panic!("expected a number");
        };
        assert_eq!(n, 0.0);
        assert!(n.is_sign_negative());
    }

    #[test]
    fn test_radix_numbers() {
        assert_eq!(decode_scalar("0x1F"), Scalar::Number(31.0));
        assert_eq!(decode_scalar("-0xff"), Scalar::Number(-255.0));
        assert_eq!(decode_scalar("0b101"), Scalar::Number(5.0));
        assert_eq!(decode_scalar("0x"), Scalar::Number(0.0));
        assert_eq!(decode_scalar("0b"), Scalar::Number(0.0));
        assert_eq!(decode_scalar("0b102"), string("0b102"));
    }

    #[test]
    fn test_bigints() {
        assert_eq!(
            decode_scalar("0n12345678901234567890"),
            Scalar::BigInt("12345678901234567890".parse().unwrap())
        );
        assert_eq!(decode_scalar("-0n5"), Scalar::BigInt(BigInt::from(-5)));
        assert_eq!(decode_scalar("0n"), Scalar::BigInt(BigInt::from(0)));
        assert_eq!(decode_scalar("0n1a"), string("0n1a"));
    }

    #[test]
    fn test_partial_numbers_are_strings() {
        assert_eq!(decode_scalar("123abc"), string("123abc"));
        assert_eq!(decode_scalar("1e"), string("1e"));
        assert_eq!(decode_scalar("-x"), string("-x"));
        assert_eq!(decode_scalar("1.2.3"), string("1.2.3"));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(decode_scalar("a%20b"), string("a b"));
        assert_eq!(decode_scalar("a+b"), string("a+b"));
        assert_eq!(decode_scalar("caf%C3%A9"), string("café"));
        assert_eq!(decode_scalar("100%"), string("100%"));
        assert_eq!(decode_scalar("%zz"), string("%zz"));
        assert_eq!(decode_scalar("%FF"), string("\u{FFFD}"));
    }

    #[test]
    fn test_leading_percent_is_retested() {
        assert_eq!(decode_scalar("%31"), Scalar::Number(1.0));
        assert_eq!(decode_scalar("%2D1"), Scalar::Number(-1.0));
        assert_eq!(decode_scalar("%2Dtest"), string("-test"));
        assert_eq!(decode_scalar("%21"), string("!"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(decode_scalar("x").kind(), ScalarKind::String);
        assert_eq!(decode_scalar("1").kind(), ScalarKind::Number);
        assert_eq!(decode_scalar("0n1").kind(), ScalarKind::BigInt);
        assert_eq!(decode_scalar("-").kind(), ScalarKind::Boolean);
        assert_eq!(decode_scalar("--").kind(), ScalarKind::Null);
        assert_eq!(ScalarKind::BigInt.to_string(), "bigint");
    }

    #[test]
    fn test_decode_key() {
        assert_eq!(decode_key("foo"), "foo");
        assert_eq!(decode_key("$foo"), "foo");
        assert_eq!(decode_key("$$foo"), "$foo");
        assert_eq!(decode_key("$"), "");
        assert_eq!(decode_key("a%28b%29"), "a(b)");
        assert_eq!(decode_key("123"), "123");
    }
}
