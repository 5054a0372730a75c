//! Plain values.
//!
//! - `foo` is `Value::String("foo")`
//! - `foo(1)bar` is `Value::Map({"foo": Number(1), "bar": String("")})`
//! - `a,b` is `Value::List([String("a"), String("b")])`
//! - `!foo` is `Value::Entity(Entity { raw: "!foo" })`

use indexmap::IndexMap;
use num_bigint::BigInt;
use uricharge_parse::Scalar;

/// A value parsed from URI Charge notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `--`
    Null,
    /// `!` (true) or `-` (false).
    Bool(bool),
    /// A number.
    Number(f64),
    /// An integer of arbitrary size.
    BigInt(BigInt),
    /// A string.
    String(String),
    /// An entity not known to the registry.
    Entity(Entity),
    /// A registered directive with its arguments.
    Directive(Directive<Value>),
    /// A list.
    List(Vec<Value>),
    /// A map. Entries keep the order they were first set in.
    Map(IndexMap<String, Value>),
}

/// An opaque `!…` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Raw text, leading `!` included.
    pub raw: String,
}

impl Entity {
    /// Create an entity from its raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// A `!name(args…)` value.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive<T> {
    /// Directive name, without the leading `!`.
    pub name: String,
    /// Arguments in order.
    pub args: Vec<T>,
}

impl<T> Directive<T> {
    /// Create a directive without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn with_arg(mut self, arg: T) -> Self {
        self.args.push(arg);
        self
    }
}

impl Directive<Value> {
    /// The value of the arguments: nothing for none, the argument itself for
    /// one, a list for more.
    pub fn value(&self) -> Option<Value> {
        match self.args.as_slice() {
            [] => None,
            [arg] => Some(arg.clone()),
            args => Some(Value::List(args.to_vec())),
        }
    }
}

impl Value {
    /// The empty string, the value of a bare key.
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(IndexMap::new())
    }

    /// Check if this is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bigint.
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// Get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as map.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get as mutable map.
    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a map entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Get a list item.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list()?.get(index)
    }

    /// Set a map entry, keeping the position of an existing one.
    ///
    /// Returns false if this is not a map.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> bool {
        match self.as_map_mut() {
            Some(entries) => {
                entries.insert(key.into(), value);
                true
            }
            None => false,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => Value::String(s),
            Scalar::Number(n) => Value::Number(n),
            Scalar::BigInt(n) => Value::BigInt(n),
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Null => Value::Null,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Value::Entity(entity)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_accessors() {
        let value: Value = [("a", Value::from(1.0)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(value.get("a").and_then(Value::as_f64), Some(1.0));
        assert_eq!(value.get("b").and_then(Value::as_str), Some("x"));
        assert_eq!(value.get("c"), None);
        assert_eq!(value.at(0), None);
        assert_eq!(Value::from("x").get("a"), None);

        let list = Value::List(vec![Value::Null, Value::Bool(true)]);
        assert!(list.at(0).is_some_and(Value::is_null));
        assert_eq!(list.at(1).and_then(Value::as_bool), Some(true));
        assert_eq!(list.at(2), None);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut value = Value::map();
        assert!(value.insert("a", Value::from(1.0)));
        assert!(value.insert("b", Value::from(2.0)));
        assert!(value.insert("a", Value::from(3.0)));
        let keys: Vec<&str> = value
            .as_map()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(value.get("a"), Some(&Value::Number(3.0)));
        assert!(!Value::Null.insert("a", Value::Null));
    }

    #[test]
    fn test_directive_value_by_arity() {
        let directive = Directive::<Value>::new("d");
        assert_eq!(directive.value(), None);
        let directive = directive.with_arg(Value::from("a"));
        assert_eq!(directive.value(), Some(Value::from("a")));
        let directive = directive.with_arg(Value::from("b"));
        assert_eq!(
            directive.value(),
            Some(Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }
}
