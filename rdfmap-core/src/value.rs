//! Native member values
//!
//! [`Value`] is the closed set of shapes a member can hold. Conversions out of
//! a `Value` widen numerics the way assignment to a wider native type would
//! and fail with [`AssignError::Mismatch`] otherwise.

use crate::entity::Record;
use crate::error::AssignError;
use crate::id::ResourceId;
use crate::lazy::Reference;
use chrono::{DateTime, Utc};

/// A member value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    DateTime(DateTime<Utc>),
    /// URI reference held as text
    Uri(String),
    /// Raw resource identifier
    Resource(ResourceId),
    /// Related record
    Ref(Reference),
    /// Collection value
    List(Vec<Value>),
}

impl Value {
    /// Short name of the native kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Byte(_) => "i8",
            Value::Short(_) => "i16",
            Value::Int(_) => "i32",
            Value::Long(_) => "i64",
            Value::Float(_) => "f32",
            Value::Double(_) => "f64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Uri(_) => "uri",
            Value::Resource(_) => "resource",
            Value::Ref(_) => "record",
            Value::List(_) => "list",
        }
    }

    /// Text form of a scalar; `None` for references and lists
    pub fn lexical(&self) -> Option<String> {
        Some(match self {
            Value::Bool(b) => b.to_string(),
            Value::Byte(n) => n.to_string(),
            Value::Short(n) => n.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => special_float(f64::from(*n)).unwrap_or_else(|| n.to_string()),
            Value::Double(n) => special_float(*n).unwrap_or_else(|| n.to_string()),
            Value::Char(c) => c.to_string(),
            Value::String(s) | Value::Uri(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            Value::Resource(_) | Value::Ref(_) | Value::List(_) => return None,
        })
    }

    /// Check if this value writes nothing (empty text or empty list)
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) | Value::Uri(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

/// XSD spelling of the non-finite floats
fn special_float(n: f64) -> Option<String> {
    let text = if n.is_nan() {
        "NaN"
    } else if n == f64::INFINITY {
        "INF"
    } else if n == f64::NEG_INFINITY {
        "-INF"
    } else {
        return None;
    };
    Some(text.to_string())
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => String,
    DateTime<Utc> => DateTime,
    ResourceId => Resource,
    Reference => Ref,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Ref(Reference::Eager(record))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

fn mismatch(expected: &'static str, found: &Value) -> AssignError {
    AssignError::mismatch(expected, found.kind_name())
}

impl TryFrom<Value> for bool {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl TryFrom<Value> for i8 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n),
            other => Err(mismatch("i8", &other)),
        }
    }
}

impl TryFrom<Value> for i16 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n.into()),
            Value::Short(n) => Ok(n),
            other => Err(mismatch("i16", &other)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n.into()),
            Value::Short(n) => Ok(n.into()),
            Value::Int(n) => Ok(n),
            other => Err(mismatch("i32", &other)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n.into()),
            Value::Short(n) => Ok(n.into()),
            Value::Int(n) => Ok(n.into()),
            Value::Long(n) => Ok(n),
            other => Err(mismatch("i64", &other)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n.into()),
            Value::Short(n) => Ok(n.into()),
            Value::Int(n) => Ok(n as f32),
            Value::Long(n) => Ok(n as f32),
            Value::Float(n) => Ok(n),
            other => Err(mismatch("f32", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Byte(n) => Ok(n.into()),
            Value::Short(n) => Ok(n.into()),
            Value::Int(n) => Ok(n.into()),
            Value::Long(n) => Ok(n as f64),
            Value::Float(n) => Ok(n.into()),
            Value::Double(n) => Ok(n),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl TryFrom<Value> for char {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Char(c) => Ok(c),
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(AssignError::mismatch("char", "string")),
                }
            }
            other => Err(mismatch("char", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) | Value::Uri(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => Err(mismatch("datetime", &other)),
        }
    }
}

impl TryFrom<Value> for ResourceId {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Resource(id) => Ok(id),
            Value::Uri(uri) => Ok(ResourceId::iri(uri)),
            Value::Ref(reference) => reference
                .resource_id()
                .ok_or_else(|| AssignError::Other("related record has no identifier".into())),
            other => Err(mismatch("resource", &other)),
        }
    }
}

impl TryFrom<Value> for Reference {
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Ref(reference) => Ok(reference),
            other => Err(mismatch("record", &other)),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = AssignError>,
{
    type Error = AssignError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}
