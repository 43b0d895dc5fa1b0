use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset};
use hashbrown::HashMap;
use serde_json::{Map, Value};

use crate::MapperError;
use crate::utils::FixedHashState;
use crate::value::FieldValue;

// -----------------------------------------------------------------------------
// DynamicValue

/// An owned, deserialized field value, already coerced to its declared
/// semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    String(String),
    Object(Map<String, Value>),
    Array(Vec<Value>),
    Timestamp(DateTime<FixedOffset>),
    /// Member name of an enumeration value, known to be valid.
    Member(&'static str),
    Record(DynamicRecord),
    List(Vec<DynamicValue>),
    Map(Vec<(DynamicValue, DynamicValue)>),
}

impl DynamicValue {
    /// Short description of the variant, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::String(_) => "string",
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

// -----------------------------------------------------------------------------
// DynamicRecord

/// Deserialized fields of one record, keyed by JSON name.
///
/// Only fields present in the input are stored. Constructors remove the
/// fields they consume.
///
/// ```
/// use jsondto_mapper::MapperError;
/// use jsondto_mapper::value::{DynamicRecord, DynamicValue};
///
/// let mut record = DynamicRecord::new("Point");
/// record.insert("x", DynamicValue::Int(4));
///
/// assert_eq!(record.take_required::<i32>("x"), Ok(4));
/// assert_eq!(record.take_or_else::<i32>("y", || -1), Ok(-1));
/// assert_eq!(record.take_required::<Option<i32>>("z"), Ok(None));
/// assert_eq!(
///     record.take_required::<i32>("x"),
///     Err(MapperError::MissingField { record: "Point", field: "x" }),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    name: &'static str,
    fields: HashMap<&'static str, DynamicValue, FixedHashState>,
}

impl DynamicRecord {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: HashMap::with_hasher(FixedHashState),
        }
    }

    #[inline]
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            fields: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Name of the record being built.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Inserts a field, returning the previous value if any.
    #[inline]
    pub fn insert(&mut self, name: &'static str, value: DynamicValue) -> Option<DynamicValue> {
        self.fields.insert(name, value)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.fields.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Removes and converts a field without a declared default.
    ///
    /// An absent field yields [`FieldValue::absent`], or
    /// [`MapperError::MissingField`] when the type has no absent value.
    pub fn take_required<T: FieldValue>(&mut self, name: &'static str) -> Result<T, MapperError> {
        match self.fields.remove(name) {
            Some(value) => T::from_dynamic(value).map_err(|e| e.within_field(name)),
            None => T::absent().ok_or(MapperError::MissingField {
                record: self.name,
                field: name,
            }),
        }
    }

    /// Removes and converts a field, falling back to `default` when absent.
    pub fn take_or_else<T: FieldValue>(
        &mut self,
        name: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, MapperError> {
        match self.fields.remove(name) {
            Some(value) => T::from_dynamic(value).map_err(|e| e.within_field(name)),
            None => Ok(default()),
        }
    }
}
