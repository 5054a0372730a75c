use num_bigint::BigInt;
use proptest::prelude::*;
use uricharge_tree::{Value, parse};

use crate::encode;

fn same_number(a: f64, b: f64) -> bool {
    if a.is_nan() {
        b.is_nan()
    } else {
        a == b && a.is_sign_negative() == b.is_sign_negative()
    }
}

#[test]
fn keywords_round_trip() {
    for value in [Value::Bool(true), Value::Bool(false), Value::Null] {
        assert_eq!(parse(&encode(&value)), value);
    }
    let zero = parse(&encode(&-0.0f64)).as_f64();
    assert!(zero.is_some_and(|z| z == 0.0 && z.is_sign_negative()));
}

proptest! {
    #[test]
    fn strings_round_trip_at_top(s in any::<String>()) {
        let encoded = encode(s.as_str());
        prop_assert_eq!(parse(&encoded), Value::String(s), "encoded as {}", encoded);
    }

    #[test]
    fn strings_round_trip_as_items(s in any::<String>(), t in any::<String>()) {
        let encoded = encode(&vec![s.as_str(), t.as_str()]);
        prop_assert_eq!(
            parse(&encoded),
            Value::List(vec![Value::String(s), Value::String(t)]),
            "encoded as {}",
            encoded
        );
    }

    #[test]
    fn strings_round_trip_in_entries(key in any::<String>(), s in any::<String>()) {
        let value: Value = [(key, Value::String(s))].into_iter().collect();
        let encoded = encode(&value);
        prop_assert_eq!(parse(&encoded), value, "encoded as {}", encoded);
    }

    #[test]
    fn leading_markers_round_trip(
        marker in prop::sample::select(vec!['-', '!', '$', '\'', '0', '7', '%']),
        rest in "[-0-9a-z.]{0,6}",
    ) {
        let s = format!("{marker}{rest}");
        for encoded in [encode(s.as_str()), encode(&vec![s.as_str()])] {
            let decoded = parse(&encoded);
            let decoded = decoded.as_str().or_else(|| decoded.at(0)?.as_str());
            prop_assert_eq!(decoded, Some(s.as_str()), "encoded as {}", encoded);
        }
    }

    #[test]
    fn numbers_round_trip(n in any::<f64>()) {
        let encoded = encode(&n);
        let decoded = parse(&encoded).as_f64();
        prop_assert!(
            decoded.is_some_and(|d| same_number(n, d)),
            "{} encoded as {} decoded as {:?}",
            n,
            encoded,
            decoded
        );
    }

    #[test]
    fn bigints_round_trip(n in any::<i128>()) {
        let n = BigInt::from(n);
        prop_assert_eq!(parse(&encode(&n)), Value::BigInt(n));
    }
}
