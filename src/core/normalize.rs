//! Conversion of arbitrary values into JSON-compatible shapes
//!
//! Every message that reaches a sink is made of strings, numbers, booleans,
//! nulls, ordered objects and arrays. The helpers here turn caller values into
//! that shape, first match wins:
//!
//! 1. values with a canonical JSON conversion ([`ToJson`]) use it as-is;
//! 2. values that only offer `Display` become strings ([`display`]);
//! 3. anything `Serialize` is coerced structurally ([`normalize`]); sequences
//!    and maps are converted element-wise, preserving order and keys.

use super::error::{LoggerError, Result};
use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use serde_json::{Map, Number, Value};
use std::fmt::Display;

/// Canonical JSON conversion for values that know their logged shape
///
/// The returned value is used verbatim and is not normalized again.
///
/// # Example
///
/// ```
/// use mloggers::ToJson;
/// use serde_json::{json, Value};
///
/// struct Accuracy { correct: u32, total: u32 }
///
/// impl ToJson for Accuracy {
///     fn to_json(&self) -> Value {
///         json!({ "accuracy": self.correct as f64 / self.total as f64 })
///     }
/// }
///
/// let value = Accuracy { correct: 9, total: 10 }.to_json();
/// assert_eq!(value["accuracy"], 0.9);
/// ```
pub trait ToJson {
    fn to_json(&self) -> Value;
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl ToJson for Map<String, Value> {
    fn to_json(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> Value {
        float(*self)
    }
}

impl ToJson for f32 {
    fn to_json(&self) -> Value {
        float(f64::from(*self))
    }
}

macro_rules! impl_to_json_via_from {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_to_json_via_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

/// `None` becomes `null`, i.e. a header key inside a record
impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToJson::to_json)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

/// JSON form of a float
///
/// NaN and the infinities have no JSON number form; they are kept as their
/// text (`NaN`, `inf`, `-inf`) so they never read as a `null` header.
///
/// ```
/// use mloggers::core::normalize::float;
/// use serde_json::json;
///
/// assert_eq!(float(0.5), json!(0.5));
/// assert_eq!(float(f64::NAN), json!("NaN"));
/// assert_eq!(float(f64::NEG_INFINITY), json!("-inf"));
/// ```
pub fn float(value: f64) -> Value {
    Number::from_f64(value).map_or_else(|| Value::String(value.to_string()), Value::Number)
}

/// Structurally coerce a value into JSON
///
/// Fails with [`LoggerError::Serialization`] naming the value's type when it
/// has no JSON representation (e.g. a map keyed by tuples, or a NaN anywhere
/// inside it).
pub fn normalize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    let name = std::any::type_name::<T>();
    value
        .serialize(FiniteCheck)
        .map_err(|e| LoggerError::serialization(name, e))?;
    serde_json::to_value(value).map_err(|e| LoggerError::serialization(name, e))
}

type Check = std::result::Result<(), serde_json::Error>;
type Compound = std::result::Result<FiniteCheck, serde_json::Error>;

/// Walks a value without building it, rejecting non-finite floats
///
/// `serde_json` silently turns them into `null`.
#[derive(Clone, Copy)]
struct FiniteCheck;

macro_rules! accept_leaf {
    ($($method:ident($ty:ty)),*) => {
        $(
            fn $method(self, _value: $ty) -> Check {
                Ok(())
            }
        )*
    };
}

impl Serializer for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept_leaf!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_i128(i128),
        serialize_u128(u128),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8])
    );

    fn serialize_f32(self, value: f32) -> Check {
        self.serialize_f64(f64::from(value))
    }

    fn serialize_f64(self, value: f64) -> Check {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ser::Error::custom(format!(
                "{} has no JSON representation",
                value
            )))
        }
    }

    fn serialize_none(self) -> Check {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Check {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Check {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Check {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Check {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Check {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Compound {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Compound {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Compound {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Compound {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Compound {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Compound {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Compound {
        Ok(self)
    }
}

impl SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Check {
        key.serialize(*self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

impl SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Check {
        value.serialize(*self)
    }

    fn end(self) -> Check {
        Ok(())
    }
}

/// Stringify a value through its `Display` implementation
pub fn display<T: Display + ?Sized>(value: &T) -> Value {
    Value::String(value.to_string())
}

/// Whether a value is a nested container rather than a leaf
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
