//! Immutable generic values with total introspection.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use num_bigint::BigInt;
use uricharge_parse::Scalar;

use crate::value::{Directive, Entity, Value};

/// A parsed value that can be navigated without knowing its shape.
///
/// Navigation never fails: asking a charge for something it does not have
/// yields [`NONE`], so lookups chain freely.
///
/// ```
/// let charge = uricharge_tree::parse_charge("user(name(alice)roles(admin,dev))");
/// assert_eq!(charge.get("user").get("name").as_str(), Some("alice"));
/// assert_eq!(charge.get("user").get("roles").at(-1).as_str(), Some("dev"));
/// assert!(!charge.get("nope").get("deeper").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Charge {
    /// Nothing.
    #[default]
    None,
    /// A single value.
    Single(Single),
    /// A list.
    List(Arc<[Charge]>),
    /// A map. Entries keep the order they were first set in.
    Map(Arc<IndexMap<String, Charge>>),
}

/// The value of a [`Charge::Single`].
#[derive(Debug, Clone, PartialEq)]
pub enum Single {
    String(String),
    Number(f64),
    BigInt(BigInt),
    Bool(bool),
    Null,
    Entity(Entity),
    Directive(Directive<Charge>),
}

/// Type tag of a [`Single`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeType {
    String,
    Number,
    BigInt,
    Boolean,
    Null,
    Entity,
    Directive,
}

/// The absent charge.
pub static NONE: Charge = Charge::None;

impl Single {
    /// The type tag of this value.
    pub fn kind(&self) -> ChargeType {
        match self {
            Single::String(_) => ChargeType::String,
            Single::Number(_) => ChargeType::Number,
            Single::BigInt(_) => ChargeType::BigInt,
            Single::Bool(_) => ChargeType::Boolean,
            Single::Null => ChargeType::Null,
            Single::Entity(_) => ChargeType::Entity,
            Single::Directive(_) => ChargeType::Directive,
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChargeType::String => "string",
            ChargeType::Number => "number",
            ChargeType::BigInt => "bigint",
            ChargeType::Boolean => "boolean",
            ChargeType::Null => "null",
            ChargeType::Entity => "entity",
            ChargeType::Directive => "directive",
        })
    }
}

impl Directive<Charge> {
    /// The value of the arguments: [`Charge::None`] for none, the argument
    /// itself for one, a list for more.
    pub fn value(&self) -> Charge {
        match self.args.as_slice() {
            [] => Charge::None,
            [arg] => arg.clone(),
            args => Charge::List(args.into()),
        }
    }
}

impl Charge {
    /// Parse a charge from `input`.
    pub fn parse(input: &str) -> Charge {
        crate::parse_charge(input)
    }

    /// Parse `input` continuing this charge.
    ///
    /// Maps are merged entry by entry, recursively; anything else is
    /// replaced.
    pub fn parse_into(self, input: &str) -> Charge {
        uricharge_parse::Parser::new()
            .parse_into(input, &mut crate::ChargeBuilder, self)
            .charge
    }

    /// Whether this is anything but [`Charge::None`].
    pub fn is_some(&self) -> bool {
        !matches!(self, Charge::None)
    }

    /// The single value, if this is one.
    pub fn value(&self) -> Option<&Single> {
        match self {
            Charge::Single(single) => Some(single),
            _ => None,
        }
    }

    /// The type tag of the single value, if this is one.
    pub fn kind(&self) -> Option<ChargeType> {
        self.value().map(Single::kind)
    }

    /// The map entries, if this is a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, Charge>> {
        match self {
            Charge::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Items of this charge seen as a list: a list's items, a single value or
    /// a map as its only item, nothing for [`Charge::None`].
    pub fn items(&self) -> &[Charge] {
        match self {
            Charge::None => &[],
            Charge::List(items) => items,
            Charge::Single(_) | Charge::Map(_) => std::slice::from_ref(self),
        }
    }

    /// Get a map entry.
    pub fn get(&self, key: &str) -> &Charge {
        self.as_map().and_then(|m| m.get(key)).unwrap_or(&NONE)
    }

    /// Get an item of [`Charge::items`]. Negative indexes count from the end.
    pub fn at(&self, index: isize) -> &Charge {
        let items = self.items();
        let index = if index < 0 {
            items.len().checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        index.and_then(|i| items.get(i)).unwrap_or(&NONE)
    }

    /// Iterate over map entries. Empty for anything but a map.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Charge)> {
        self.as_map()
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Iterate over map keys. Empty for anything but a map.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(k, _)| k)
    }

    /// Iterate over [`Charge::items`].
    pub fn list(&self) -> impl Iterator<Item = &Charge> {
        self.items().iter()
    }

    /// Get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self.value()? {
            Single::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number.
    pub fn as_f64(&self) -> Option<f64> {
        match self.value()? {
            Single::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bigint.
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self.value()? {
            Single::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// Get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value()? {
            Single::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if this is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Charge::Single(Single::Null))
    }

    /// Get as entity.
    pub fn as_entity(&self) -> Option<&Entity> {
        match self.value()? {
            Single::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Get as directive.
    pub fn as_directive(&self) -> Option<&Directive<Charge>> {
        match self.value()? {
            Single::Directive(directive) => Some(directive),
            _ => None,
        }
    }
}

impl From<Scalar> for Single {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => Single::String(s),
            Scalar::Number(n) => Single::Number(n),
            Scalar::BigInt(n) => Single::BigInt(n),
            Scalar::Bool(b) => Single::Bool(b),
            Scalar::Null => Single::Null,
        }
    }
}

impl From<Scalar> for Charge {
    fn from(scalar: Scalar) -> Self {
        Charge::Single(scalar.into())
    }
}

impl From<Value> for Charge {
    fn from(value: Value) -> Self {
        let single = match value {
            Value::Null => Single::Null,
            Value::Bool(b) => Single::Bool(b),
            Value::Number(n) => Single::Number(n),
            Value::BigInt(n) => Single::BigInt(n),
            Value::String(s) => Single::String(s),
            Value::Entity(entity) => Single::Entity(entity),
            Value::Directive(directive) => Single::Directive(Directive {
                name: directive.name,
                args: directive.args.into_iter().map(Charge::from).collect(),
            }),
            Value::List(items) => {
                return Charge::List(items.into_iter().map(Charge::from).collect());
            }
            Value::Map(entries) => {
                return Charge::Map(Arc::new(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k, Charge::from(v)))
                        .collect(),
                ));
            }
        };
        Charge::Single(single)
    }
}
