//! Builder of plain values.

use indexmap::IndexMap;
use uricharge_parse::{Receiver, Scalar};

use crate::value::{Directive, Entity, Value};

/// Receiver building [`Value`]s.
///
/// A map continues a map it is parsed into; repeated keys continue their
/// previous value the same way. Anything else replaces what was there.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueBuilder;

impl ValueBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }
}

impl Receiver for ValueBuilder {
    type Charge = Value;
    type Map = IndexMap<String, Value>;
    type List = Vec<Value>;
    type Directive = Directive<Value>;

    /// Plain values have no absent state; it reads as null.
    fn none(&mut self) -> Value {
        Value::Null
    }

    fn create_value(&mut self, value: Scalar) -> Value {
        value.into()
    }

    fn create_entity(&mut self, raw: &str) -> Value {
        Value::Entity(Entity::new(raw))
    }

    fn rx_map(&mut self, base: Option<Value>) -> Option<Self::Map> {
        Some(match base {
            Some(Value::Map(entries)) => entries,
            _ => IndexMap::new(),
        })
    }

    fn put(&mut self, map: &mut Self::Map, key: String, value: Value) {
        map.insert(key, value);
    }

    fn take_entry(&mut self, map: &mut Self::Map, key: &str) -> Option<Value> {
        map.get_mut(key)
            .map(|slot| std::mem::replace(slot, Value::Null))
    }

    fn end_map(&mut self, map: Self::Map) -> Value {
        Value::Map(map)
    }

    fn rx_list(&mut self) -> Option<Self::List> {
        Some(Vec::new())
    }

    fn add(&mut self, list: &mut Self::List, value: Value) {
        list.push(value);
    }

    fn end_list(&mut self, list: Self::List) -> Value {
        Value::List(list)
    }

    fn rx_directive(&mut self, name: &str) -> Option<Self::Directive> {
        Some(Directive::new(name))
    }

    fn add_arg(&mut self, directive: &mut Self::Directive, value: Value) {
        directive.args.push(value);
    }

    fn end_directive(&mut self, directive: Self::Directive) -> Value {
        Value::Directive(directive)
    }
}
