//! Serde serializer for URI Charge.

use num_bigint::BigInt;
use serde::ser::{self, Serialize};
use uricharge_format::{EncodeOptions, Encoded, ListWriter, MapWriter, Placement, Shape};

use crate::error::{Error, Result};

/// URI Charge serializer implementing serde::Serializer.
///
/// Each value is encoded for the placement it ends up in, so the serializer
/// is consumed by a single value and produces its [`Encoded`] form.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'o> {
    placement: Placement,
    options: &'o EncodeOptions,
}

impl<'o> Serializer<'o> {
    /// Create a serializer for a value written at `placement`.
    pub fn new(placement: Placement, options: &'o EncodeOptions) -> Self {
        Self { placement, options }
    }

    fn at(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    /// Wrap the payload of an enum variant into a single-entry map.
    fn variant(self, variant: &str, value: Encoded) -> Encoded {
        let value = if value.shape == Shape::Absent {
            Encoded::null()
        } else {
            value
        };
        let mut map = MapWriter::new(self.options);
        map.entry(variant, value);
        map.finish()
    }
}

impl<'o> ser::Serializer for Serializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    type SerializeSeq = SeqSerializer<'o>;
    type SerializeTuple = SeqSerializer<'o>;
    type SerializeTupleStruct = SeqSerializer<'o>;
    type SerializeTupleVariant = SeqSerializer<'o>;
    type SerializeMap = MapSerializer<'o>;
    type SerializeStruct = MapSerializer<'o>;
    type SerializeStructVariant = MapSerializer<'o>;

    fn serialize_bool(self, v: bool) -> Result<Encoded> {
        Ok(Encoded::bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_i128(self, v: i128) -> Result<Encoded> {
        Ok(Encoded::bigint(&BigInt::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Encoded> {
        Ok(Encoded::integer(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Encoded> {
        Ok(Encoded::bigint(&BigInt::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Encoded> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Encoded> {
        Ok(Encoded::number(v))
    }

    fn serialize_char(self, v: char) -> Result<Encoded> {
        self.serialize_str(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<Encoded> {
        Ok(Encoded::string(v, self.placement))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Encoded> {
        let mut list = ListWriter::new(self.placement, self.options);
        for byte in v {
            list.push(Encoded::integer((*byte).into()));
        }
        Ok(list.finish())
    }

    fn serialize_none(self) -> Result<Encoded> {
        Ok(Encoded::absent())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Encoded> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Encoded> {
        Ok(Encoded::absent())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Encoded> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Encoded> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Encoded> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Encoded> {
        let value = value.serialize(self.at(Placement::EntryValue))?;
        Ok(self.variant(variant, value))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            ser: self,
            list: ListWriter::new(self.placement, self.options),
            variant: None,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SeqSerializer {
            ser: self,
            list: ListWriter::new(Placement::EntryValue, self.options),
            variant: Some(variant),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            ser: self,
            map: MapWriter::new(self.options),
            key: None,
            variant: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(MapSerializer {
            ser: self,
            map: MapWriter::new(self.options),
            key: None,
            variant: Some(variant),
        })
    }
}

/// Serializer for sequences.
pub struct SeqSerializer<'o> {
    ser: Serializer<'o>,
    list: ListWriter<'o>,
    variant: Option<&'static str>,
}

impl<'o> SeqSerializer<'o> {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let item = value.serialize(self.ser.at(Placement::ListItem))?;
        self.list.push(item);
        Ok(())
    }

    fn finish(self) -> Result<Encoded> {
        let list = self.list.finish();
        Ok(match self.variant {
            Some(variant) => self.ser.variant(variant, list),
            None => list,
        })
    }
}

impl<'o> ser::SerializeSeq for SeqSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

impl<'o> ser::SerializeTuple for SeqSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

impl<'o> ser::SerializeTupleStruct for SeqSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

impl<'o> ser::SerializeTupleVariant for SeqSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

/// Serializer for maps and structs.
pub struct MapSerializer<'o> {
    ser: Serializer<'o>,
    map: MapWriter<'o>,
    key: Option<String>,
    variant: Option<&'static str>,
}

impl<'o> MapSerializer<'o> {
    fn entry<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = value.serialize(self.ser.at(Placement::EntryValue))?;
        self.map.entry(key, value);
        Ok(())
    }

    fn finish(self) -> Result<Encoded> {
        let map = self.map.finish();
        Ok(match self.variant {
            Some(variant) => self.ser.variant(variant, map),
            None => map,
        })
    }
}

impl<'o> ser::SerializeMap for MapSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::new("map value serialized before its key"))?;
        self.entry(&key, value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

impl<'o> ser::SerializeStruct for MapSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.entry(key, value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

impl<'o> ser::SerializeStructVariant for MapSerializer<'o> {
    type Ok = Encoded;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.entry(key, value)
    }

    fn end(self) -> Result<Encoded> {
        self.finish()
    }
}

/// Helper serializer to extract string keys from map keys.
struct KeySerializer;

impl KeySerializer {
    fn unsupported(kind: &str) -> Error {
        Error::new(format!("map keys must be strings, got {kind}"))
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = ser::Impossible<String, Error>;
    type SerializeTuple = ser::Impossible<String, Error>;
    type SerializeTupleStruct = ser::Impossible<String, Error>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = ser::Impossible<String, Error>;
    type SerializeStruct = ser::Impossible<String, Error>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(Self::unsupported("a float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(Self::unsupported("a float"))
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Self::unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(Self::unsupported("none"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Self::unsupported("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(Self::unsupported(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(Self::unsupported(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Self::unsupported("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Self::unsupported("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Self::unsupported(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::unsupported(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Self::unsupported("a map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Self::unsupported(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::unsupported(name))
    }
}
