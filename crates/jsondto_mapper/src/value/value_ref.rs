use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::DynRecord;

/// A borrowed view of a field value.
///
/// Containers are flattened into vectors of views, so the serializer never
/// needs the concrete container type.
#[derive(Clone)]
pub enum ValueRef<'a> {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Timestamp(&'a DateTime<FixedOffset>),
    /// Member name of an enumeration value.
    Member(&'static str),
    Record(&'a dyn DynRecord),
    List(Vec<ValueRef<'a>>),
    Map(Vec<(ValueRef<'a>, ValueRef<'a>)>),
}

impl ValueRef<'_> {
    /// Short description of the variant, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Object(_) => "raw object",
            Self::Array(_) => "raw array",
            Self::Timestamp(_) => "timestamp",
            Self::Member(_) => "enumeration member",
            Self::Record(_) => "record",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Object(v) => f.debug_tuple("Object").field(v).finish(),
            Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Self::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            Self::Member(v) => f.debug_tuple("Member").field(v).finish(),
            Self::Record(v) => f.debug_tuple("Record").field(&v.record_type()).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
        }
    }
}
