//! Encoding of values to URI Charge text.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use num_bigint::BigInt;
use uricharge_tree::{Charge, Single, Value};

use crate::{EncodeOptions, Encoded, ListWriter, MapWriter, Placement};

/// A value that knows how to encode itself.
///
/// Containers encode their items as [`Placement::ListItem`] and their entry
/// values as [`Placement::EntryValue`], then join them with a
/// [`ListWriter`] or [`MapWriter`].
pub trait ToCharge {
    /// Encode this value for `placement`.
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded;
}

/// Encode a value as a whole input with default options.
pub fn encode<T: ToCharge + ?Sized>(value: &T) -> String {
    encode_with(value, Placement::Top, &EncodeOptions::default())
}

/// Encode a value for `placement`.
pub fn encode_with<T: ToCharge + ?Sized>(
    value: &T,
    placement: Placement,
    options: &EncodeOptions,
) -> String {
    value.to_charge(placement, options).text
}

/// Encode items as a list.
pub fn encode_list<'a, T, I>(items: I, placement: Placement, options: &EncodeOptions) -> Encoded
where
    T: ToCharge + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut list = ListWriter::new(placement, options);
    for item in items {
        list.push(item.to_charge(Placement::ListItem, options));
    }
    list.finish()
}

/// Encode entries as a map.
pub fn encode_map<'a, K, V, I>(entries: I, options: &EncodeOptions) -> Encoded
where
    K: AsRef<str> + 'a,
    V: ToCharge + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut map = MapWriter::new(options);
    for (key, value) in entries {
        map.entry(
            key.as_ref(),
            value.to_charge(Placement::EntryValue, options),
        );
    }
    map.finish()
}

impl ToCharge for Value {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        match self {
            Value::Null => Encoded::null(),
            Value::Bool(b) => Encoded::bool(*b),
            Value::Number(n) => Encoded::number(*n),
            Value::BigInt(n) => Encoded::bigint(n),
            Value::String(s) => Encoded::string(s, placement),
            Value::Entity(entity) => Encoded::entity(&entity.raw),
            Value::Directive(directive) => Encoded::directive(
                &directive.name,
                directive
                    .args
                    .iter()
                    .map(|arg| arg.to_charge(Placement::ListItem, options)),
            ),
            Value::List(items) => encode_list(items, placement, options),
            Value::Map(entries) => encode_map(entries, options),
        }
    }
}

impl ToCharge for Charge {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        match self {
            Charge::None => Encoded::absent(),
            Charge::Single(single) => single.to_charge(placement, options),
            Charge::List(items) => encode_list(items.iter(), placement, options),
            Charge::Map(entries) => encode_map(entries.iter(), options),
        }
    }
}

impl ToCharge for Single {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        match self {
            Single::String(s) => Encoded::string(s, placement),
            Single::Number(n) => Encoded::number(*n),
            Single::BigInt(n) => Encoded::bigint(n),
            Single::Bool(b) => Encoded::bool(*b),
            Single::Null => Encoded::null(),
            Single::Entity(entity) => Encoded::entity(&entity.raw),
            Single::Directive(directive) => Encoded::directive(
                &directive.name,
                directive
                    .args
                    .iter()
                    .map(|arg| arg.to_charge(Placement::ListItem, options)),
            ),
        }
    }
}

impl ToCharge for serde_json::Value {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        use serde_json::Value as Json;

        match self {
            Json::Null => Encoded::null(),
            Json::Bool(b) => Encoded::bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Encoded::integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Encoded::integer(i128::from(u))
                } else {
                    Encoded::number(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Encoded::string(s, placement),
            Json::Array(items) => encode_list(items, placement, options),
            Json::Object(entries) => encode_map(entries, options),
        }
    }
}

impl<T: ToCharge + ?Sized> ToCharge for &T {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        (**self).to_charge(placement, options)
    }
}

impl<T: ToCharge + ?Sized> ToCharge for Box<T> {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        (**self).to_charge(placement, options)
    }
}

impl<T: ToCharge> ToCharge for Option<T> {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        match self {
            Some(value) => value.to_charge(placement, options),
            None => Encoded::absent(),
        }
    }
}

impl ToCharge for str {
    fn to_charge(&self, placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::string(self, placement)
    }
}

impl ToCharge for String {
    fn to_charge(&self, placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::string(self, placement)
    }
}

impl ToCharge for bool {
    fn to_charge(&self, _placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::bool(*self)
    }
}

impl ToCharge for f64 {
    fn to_charge(&self, _placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::number(*self)
    }
}

impl ToCharge for f32 {
    fn to_charge(&self, _placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::number(f64::from(*self))
    }
}

impl ToCharge for BigInt {
    fn to_charge(&self, _placement: Placement, _options: &EncodeOptions) -> Encoded {
        Encoded::bigint(self)
    }
}

macro_rules! impl_to_charge_for_integers {
    ($($ty:ty),*) => {
        $(
            impl ToCharge for $ty {
                fn to_charge(&self, _placement: Placement, _options: &EncodeOptions) -> Encoded {
                    Encoded::integer(i128::from(*self))
                }
            }
        )*
    };
}

impl_to_charge_for_integers!(i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: ToCharge> ToCharge for [T] {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_list(self, placement, options)
    }
}

impl<T: ToCharge, const N: usize> ToCharge for [T; N] {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_list(self, placement, options)
    }
}

impl<T: ToCharge> ToCharge for Vec<T> {
    fn to_charge(&self, placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_list(self, placement, options)
    }
}

impl<K: AsRef<str>, V: ToCharge, S> ToCharge for IndexMap<K, V, S> {
    fn to_charge(&self, _placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_map(self, options)
    }
}

impl<K: AsRef<str>, V: ToCharge> ToCharge for BTreeMap<K, V> {
    fn to_charge(&self, _placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_map(self, options)
    }
}

impl<K: AsRef<str>, V: ToCharge, S: BuildHasher> ToCharge for HashMap<K, V, S> {
    fn to_charge(&self, _placement: Placement, options: &EncodeOptions) -> Encoded {
        encode_map(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;
    use uricharge_tree::{Directive, Entity, parse, parse_charge};

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    fn list<const N: usize>(items: [Value; N]) -> Value {
        Value::List(items.into())
    }

    fn legacy<T: ToCharge + ?Sized>(value: &T) -> String {
        encode_with(value, Placement::Top, &EncodeOptions::new().legacy())
    }

    #[test]
    fn test_encode_maps() {
        insta::assert_snapshot!(encode(&map([("foo", Value::from("bar"))])), @"foo(bar)");
        insta::assert_snapshot!(
            encode(&map([("foo", map([("bar", map([("baz", Value::from(1.0)), ("test", Value::from(""))]))]))])),
            @"foo(bar(baz(1)test))"
        );
        insta::assert_snapshot!(encode(&map([("foo", Value::map())])), @"foo($)");
        insta::assert_snapshot!(legacy(&map([("foo", Value::map())])), @"foo(!())");
        insta::assert_snapshot!(encode(&map([("a b", Value::from("c,d"))])), @"a%20b(c%2Cd)");
        insta::assert_snapshot!(encode(&map([("$key", Value::from("-1"))])), @"$%24key('-1)");
    }

    #[test]
    fn test_encode_empty_list_in_map() {
        let value = map([("foo", list([]))]);
        insta::assert_snapshot!(encode(&value), @"foo(,)");
        insta::assert_snapshot!(legacy(&value), @"foo(!!)");
    }

    #[test]
    fn test_encode_lists() {
        insta::assert_snapshot!(encode(&list([Value::from(123.0), Value::from(456.0)])), @"123,456");
        insta::assert_snapshot!(encode(&list([Value::from("x")])), @"x,");
        insta::assert_snapshot!(encode(&list([list([])])), @"(,)");
        insta::assert_snapshot!(encode(&list([list([list([])])])), @"((,))");
        insta::assert_snapshot!(encode(&list([Value::from("")])), @"',");
        insta::assert_snapshot!(encode(&list([])), @",");
        insta::assert_snapshot!(legacy(&list([])), @"!!");
        insta::assert_snapshot!(legacy(&list([list([])])), @"!!,");
        insta::assert_snapshot!(
            encode(&list([list([Value::from(123.0)]), list([Value::from(456.0)]), map([("foo", Value::from(""))])])),
            @"(123),(456),foo()"
        );
    }

    #[test]
    fn test_encode_scalars() {
        insta::assert_snapshot!(encode(&Value::from(true)), @"!");
        insta::assert_snapshot!(encode(&Value::from(false)), @"-");
        insta::assert_snapshot!(encode(&Value::Null), @"--");
        insta::assert_snapshot!(encode(&Value::from(-0.0)), @"-0");
        insta::assert_snapshot!(encode(&Value::from(f64::NAN)), @"!NaN");
        insta::assert_snapshot!(encode(&Value::from("-test")), @"%2Dtest");
        insta::assert_snapshot!(encode(&map([("a", Value::from("-test"))])), @"a('-test)");
        insta::assert_snapshot!(encode(&Value::from("")), @"");
        insta::assert_snapshot!(encode(&Value::Entity(Entity::new("!foo(bar)"))), @"!foo(bar)");
    }

    #[test]
    fn test_encode_directive() {
        let directive = Directive::new("d")
            .with_arg(Value::from("a"))
            .with_arg(list([Value::from(1.0)]));
        insta::assert_snapshot!(encode(&Value::Directive(directive)), @"!d(a,(1))");
    }

    #[test]
    fn test_encode_native_values() {
        insta::assert_snapshot!(encode(&vec![1, 2, 3]), @"1,2,3");
        insta::assert_snapshot!(encode(&[Some("a"), None]), @"a,--");
        insta::assert_snapshot!(encode(&Option::<i32>::None), @"--");
        insta::assert_snapshot!(encode(&9_007_199_254_740_993_i64), @"0n9007199254740993");
        insta::assert_snapshot!(encode(&-9_007_199_254_740_993_i64), @"-0n9007199254740993");
        insta::assert_snapshot!(encode(&42_u8), @"42");
        insta::assert_snapshot!(encode("text"), @"text");

        let mut entries = BTreeMap::new();
        entries.insert("b", Some(2));
        entries.insert("a", Some(1));
        entries.insert("none", None);
        insta::assert_snapshot!(encode(&entries), @"a(1)b(2)");

        let mut entries = HashMap::new();
        entries.insert("k".to_string(), vec!["v"]);
        insta::assert_snapshot!(encode(&entries), @"k(v,)");
    }

    #[test]
    fn test_encode_json() {
        let json = serde_json::json!({
            "name": "alice",
            "tags": [],
            "age": 42,
            "score": 1.5,
            "admin": true,
            "note": null,
        });
        insta::assert_snapshot!(encode(&json), @"admin(!)age(42)name(alice)note(--)score(1.5)tags(,)");
    }

    #[test]
    fn test_encode_charge() {
        let charge = parse_charge("user(name(alice)roles(admin,dev))");
        insta::assert_snapshot!(encode(&charge), @"user(name(alice)roles(admin,dev))");
        insta::assert_snapshot!(encode(charge.get("missing")), @"--");
    }

    #[test]
    fn test_round_trip_values() {
        for input in [
            "foo(bar(1,2))baz",
            "(1),(2),x(y)",
            "a,'',b",
            "'q(1),!e(x),$k",
            "0n5,-0,--",
            "a()b(c($)d(,))e",
        ] {
            let value = parse(input);
            assert_eq!(parse(&encode(&value)), value, "{input}");
        }
    }
}
