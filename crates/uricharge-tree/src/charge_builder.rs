//! Builder of generic charges.

use std::sync::Arc;

use indexmap::IndexMap;
use uricharge_parse::{Receiver, Scalar};

use crate::charge::{Charge, Single};
use crate::value::{Directive, Entity};

/// Receiver building [`Charge`]s.
///
/// Containers are accumulated mutably and frozen when they end. A map base
/// is thawed again, without copying when nothing else shares it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeBuilder;

impl ChargeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }
}

impl Receiver for ChargeBuilder {
    type Charge = Charge;
    type Map = IndexMap<String, Charge>;
    type List = Vec<Charge>;
    type Directive = Directive<Charge>;

    fn none(&mut self) -> Charge {
        Charge::None
    }

    fn create_value(&mut self, value: Scalar) -> Charge {
        value.into()
    }

    fn create_entity(&mut self, raw: &str) -> Charge {
        Charge::Single(Single::Entity(Entity::new(raw)))
    }

    fn rx_map(&mut self, base: Option<Charge>) -> Option<Self::Map> {
        Some(match base {
            Some(Charge::Map(entries)) => Arc::unwrap_or_clone(entries),
            _ => IndexMap::new(),
        })
    }

    fn put(&mut self, map: &mut Self::Map, key: String, value: Charge) {
        map.insert(key, value);
    }

    fn take_entry(&mut self, map: &mut Self::Map, key: &str) -> Option<Charge> {
        map.get_mut(key).map(std::mem::take)
    }

    fn end_map(&mut self, map: Self::Map) -> Charge {
        Charge::Map(Arc::new(map))
    }

    fn rx_list(&mut self) -> Option<Self::List> {
        Some(Vec::new())
    }

    fn add(&mut self, list: &mut Self::List, value: Charge) {
        list.push(value);
    }

    fn end_list(&mut self, list: Self::List) -> Charge {
        Charge::List(list.into())
    }

    fn rx_directive(&mut self, name: &str) -> Option<Self::Directive> {
        Some(Directive::new(name))
    }

    fn add_arg(&mut self, directive: &mut Self::Directive, value: Charge) {
        directive.args.push(value);
    }

    fn end_directive(&mut self, directive: Self::Directive) -> Charge {
        Charge::Single(Single::Directive(directive))
    }
}
