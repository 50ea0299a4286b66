//! Argument values as a closed, tagged union.
//!
//! Every argument literal the encoder understands has a variant here; the
//! encoder matches exhaustively so a new kind cannot silently fall through.
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::parameter::{Argument, Parameter};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Id(String),
    Uuid(uuid::Uuid),
    Enum(EnumValue),
    DateTime(DateTime<FixedOffset>),
    List(Vec<Value>),
    Object(InputObject),
    /// Dynamic JSON, e.g. values of object-shaped custom scalars.
    Json(serde_json::Value),
    /// Anything else; rendered as its quoted text form.
    Other(String),
}

/// An enumeration member: its symbolic name and optional wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub symbol: String,
    pub wire_name: Option<String>,
}

/// Implemented by generated schema enums.
pub trait GraphQlEnum {
    fn symbol(&self) -> &'static str;

    /// The name the schema declares, when it differs from [`Self::symbol`].
    fn wire_name(&self) -> Option<&'static str> {
        None
    }
}

/// A structured input-object literal: ordered named properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputObject {
    properties: IndexMap<String, Argument>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Value {
    pub fn id(id: impl Into<String>) -> Self {
        Value::Id(id.into())
    }

    pub fn enumeration<E: GraphQlEnum + ?Sized>(value: &E) -> Self {
        Value::Enum(EnumValue {
            symbol: value.symbol().to_string(),
            wire_name: value.wire_name().map(str::to_string),
        })
    }

    pub fn display(value: impl std::fmt::Display) -> Self {
        Value::Other(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl EnumValue {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), wire_name: None }
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Wire name when annotated, symbolic name otherwise.
    pub fn literal(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.symbol)
    }
}

impl InputObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property; re-setting a name overwrites it in place.
    pub fn set(&mut self, name: &str, value: impl Into<Argument>) -> Result<&mut Self> {
        if name.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }
        self.properties.insert(name.to_string(), value.into());
        Ok(self)
    }

    /// Sets a property from an optional parameter; absent parameters are skipped.
    pub fn set_optional<T: Clone + Into<Value>>(
        &mut self,
        name: &str,
        parameter: Option<&Parameter<T>>,
    ) -> Result<&mut Self> {
        match parameter {
            Some(parameter) => self.set(name, parameter),
            None => Ok(self),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(x: $t) -> Self { Value::Int(x as i64) }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(x: $t) -> Self { Value::UInt(x as u64) }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        // Through the shortest decimal text so 0.1f32 stays 0.1.
        Value::Float(x.to_string().parse().unwrap_or(x as f64))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Bool(x)
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::String(x.to_string())
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::String(x)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(x: uuid::Uuid) -> Self {
        Value::Uuid(x)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(x: DateTime<FixedOffset>) -> Self {
        Value::DateTime(x)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(x: DateTime<Utc>) -> Self {
        Value::DateTime(x.fixed_offset())
    }
}

/// Naive date-times are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(x: NaiveDateTime) -> Self {
        Value::DateTime(x.and_utc().fixed_offset())
    }
}

impl From<EnumValue> for Value {
    fn from(x: EnumValue) -> Self {
        Value::Enum(x)
    }
}

impl From<InputObject> for Value {
    fn from(x: InputObject) -> Self {
        Value::Object(x)
    }
}

impl From<serde_json::Value> for Value {
    fn from(x: serde_json::Value) -> Self {
        Value::Json(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        x.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(xs: Vec<T>) -> Self {
        Value::List(xs.into_iter().map(Into::into).collect())
    }
}
