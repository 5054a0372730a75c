//! Serde deserializer for URI Charge.

use indexmap::IndexMap;
use serde::de::{self, IntoDeserializer, Unexpected, Visitor};
use uricharge_format::MAX_SAFE_INTEGER;
use uricharge_tree::Value;

use crate::error::{Error, Result};

/// Deserializer over a parsed [`Value`].
#[derive(Debug)]
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    /// Create a deserializer for the given value.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match &self.value {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Number(n) => Unexpected::Float(*n),
            Value::BigInt(_) => Unexpected::Other("bigint"),
            Value::String(s) => Unexpected::Str(s),
            Value::Entity(_) => Unexpected::Other("entity"),
            Value::Directive(_) => Unexpected::Other("directive"),
            Value::List(_) => Unexpected::Seq,
            Value::Map(_) => Unexpected::Map,
        }
    }

    fn invalid_type(&self, expected: &dyn de::Expected) -> Error {
        de::Error::invalid_type(self.unexpected(), expected)
    }

    /// The value as an integer: an integral number or a bigint.
    fn integer(&self) -> Option<i128> {
        match &self.value {
            Value::Number(n)
                if n.fract() == 0.0 && *n >= i128::MIN as f64 && *n < i128::MAX as f64 =>
            {
                Some(*n as i128)
            }
            Value::BigInt(n) => i128::try_from(n).ok(),
            _ => None,
        }
    }

    /// The value as text: strings, and entities by their raw text.
    ///
    /// Numbers and booleans are refused, since their decoded form no longer
    /// carries the text they were written as (`01234`, `0x10`).
    fn text(self) -> std::result::Result<String, Self> {
        match self.value {
            Value::String(s) => Ok(s),
            Value::Entity(entity) => Ok(entity.raw),
            _ => Err(self),
        }
    }
}

/// Whether `n` is better handed to a visitor as an integer.
fn is_plain_integer(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64 && !(n == 0.0 && n.is_sign_negative())
}

macro_rules! deserialize_integer {
    ($($method:ident => $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                match self.integer().and_then(|n| <$ty>::try_from(n).ok()) {
                    Some(n) => visitor.$visit(n),
                    None => Err(self.invalid_type(&visitor)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) if is_plain_integer(n) => {
                if n < 0.0 {
                    visitor.visit_i64(n as i64)
                } else {
                    visitor.visit_u64(n as u64)
                }
            }
            Value::Number(n) => visitor.visit_f64(n),
            Value::BigInt(n) => {
                if let Ok(i) = i64::try_from(&n) {
                    visitor.visit_i64(i)
                } else if let Ok(u) = u64::try_from(&n) {
                    visitor.visit_u64(u)
                } else if let Ok(i) = i128::try_from(&n) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&n) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_string(n.to_string())
                }
            }
            Value::String(s) => visitor.visit_string(s),
            Value::Entity(entity) => visitor.visit_string(entity.raw),
            Value::Directive(directive) => {
                let value = directive.value().unwrap_or(Value::Null);
                let mut entries = IndexMap::new();
                entries.insert(directive.name, value);
                visitor.visit_map(MapAccess::new(entries))
            }
            Value::List(items) => visitor.visit_seq(SeqAccess::new(items)),
            Value::Map(entries) => visitor.visit_map(MapAccess::new(entries)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    deserialize_integer! {
        deserialize_i8 => i8, visit_i8;
        deserialize_i16 => i16, visit_i16;
        deserialize_i32 => i32, visit_i32;
        deserialize_i64 => i64, visit_i64;
        deserialize_i128 => i128, visit_i128;
        deserialize_u8 => u8, visit_u8;
        deserialize_u16 => u16, visit_u16;
        deserialize_u32 => u32, visit_u32;
        deserialize_u64 => u64, visit_u64;
    }

    fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let n = match &self.value {
            Value::BigInt(n) => u128::try_from(n).ok(),
            _ => self.integer().and_then(|n| u128::try_from(n).ok()),
        };
        match n {
            Some(n) => visitor.visit_u128(n),
            None => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match &self.value {
            Value::Number(n) => visitor.visit_f64(*n),
            Value::BigInt(_) => match self.integer() {
                Some(n) => visitor.visit_f64(n as f64),
                None => Err(self.invalid_type(&visitor)),
            },
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if let Value::String(s) = &self.value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(c);
            }
        }
        Err(self.invalid_type(&visitor))
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.text() {
            Ok(s) => visitor.visit_string(s),
            Err(de) => Err(de.invalid_type(&visitor)),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            Value::List(items) => {
                let bytes = items
                    .into_iter()
                    .map(|item| {
                        let item = Deserializer::new(item);
                        item.integer()
                            .and_then(|n| u8::try_from(n).ok())
                            .ok_or_else(|| item.invalid_type(&"a byte"))
                    })
                    .collect::<Result<Vec<u8>>>()?;
                visitor.visit_byte_buf(bytes)
            }
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match &self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(s) if s.is_empty() => visitor.visit_unit(),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::List(items) => visitor.visit_seq(SeqAccess::new(items)),
            // a single value is a one-item list
            value => visitor.visit_seq(SeqAccess::new(vec![value])),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Map(entries) => visitor.visit_map(MapAccess::new(entries)),
            Value::String(s) if s.is_empty() => visitor.visit_map(MapAccess::new(IndexMap::new())),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumAccess {
                variant,
                value: None,
            }),
            Value::Map(entries) if entries.len() == 1 => {
                let Some((variant, value)) = entries.into_iter().next() else {
                    return Err(Error::new("expected a single-entry map"));
                };
                visitor.visit_enum(EnumAccess {
                    variant,
                    value: Some(value),
                })
            }
            Value::Directive(directive) => {
                let value = directive.value();
                visitor.visit_enum(EnumAccess {
                    variant: directive.name,
                    value,
                })
            }
            _ => Err(self.invalid_type(&"a string or a single-entry map")),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

struct SeqAccess {
    items: std::vec::IntoIter<Value>,
    index: usize,
}

impl SeqAccess {
    fn new(items: Vec<Value>) -> Self {
        Self {
            items: items.into_iter(),
            index: 0,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        let Some(item) = self.items.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        seed.deserialize(Deserializer::new(item))
            .map(Some)
            .map_err(|err| err.in_item(index))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct MapAccess {
    entries: indexmap::map::IntoIter<String, Value>,
    /// The entry whose key was just handed out.
    entry: Option<(String, Value)>,
}

impl MapAccess {
    fn new(entries: IndexMap<String, Value>) -> Self {
        Self {
            entries: entries.into_iter(),
            entry: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        let deserializer: de::value::StringDeserializer<Error> = key.clone().into_deserializer();
        self.entry = Some((key, value));
        seed.deserialize(deserializer).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let (key, value) = self
            .entry
            .take()
            .ok_or_else(|| Error::new("map value requested before its key"))?;
        seed.deserialize(Deserializer::new(value))
            .map_err(|err| err.in_key(&key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct EnumAccess {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumAccess {
    type Error = Error;
    type Variant = VariantAccess;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(variant)?;
        Ok((variant, VariantAccess { value: self.value }))
    }
}

struct VariantAccess {
    value: Option<Value>,
}

impl VariantAccess {
    fn payload(self, expected: &str) -> Result<Deserializer> {
        self.value
            .map(Deserializer::new)
            .ok_or_else(|| de::Error::invalid_type(Unexpected::UnitVariant, &expected))
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(Value::String(s)) if s.is_empty() => Ok(()),
            Some(value) => Err(Deserializer::new(value).invalid_type(&"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload("newtype variant")?)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.payload("tuple variant")?, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.payload("struct variant")?, visitor)
    }
}
