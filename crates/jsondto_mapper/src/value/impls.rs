use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::MapperError;
use crate::info::{PrimitiveKind, SemanticType};
use crate::timestamp::parse_timestamp;
use crate::value::{DynamicValue, FieldValue, ValueRef};

#[cold]
fn mismatch(expected: impl core::fmt::Display, found: &DynamicValue) -> MapperError {
    MapperError::invalid(expected, found.kind_name())
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer {
    ($variant:ident as $wide:ty => $($ty:ty),*) => {$(
        impl FieldValue for $ty {
            #[inline]
            fn semantic_type() -> SemanticType {
                SemanticType::Primitive(PrimitiveKind::Integer)
            }

            #[inline]
            fn as_value_ref(&self) -> ValueRef<'_> {
                ValueRef::$variant(*self as $wide)
            }

            fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
                let out_of_range = |v: &dyn core::fmt::Display| {
                    MapperError::invalid(stringify!($ty), format!("out-of-range integer {v}"))
                };
                match value {
                    DynamicValue::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                    DynamicValue::UInt(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                    other => Err(mismatch(stringify!($ty), &other)),
                }
            }
        }
    )*};
}

impl_integer!(Int as i64 => i8, i16, i32, i64, isize);
impl_integer!(UInt as u64 => u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

impl FieldValue for f64 {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::Float)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Float(*self)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Float(v) => Ok(v),
            DynamicValue::Int(v) => Ok(v as f64),
            DynamicValue::UInt(v) => Ok(v as f64),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FieldValue for f32 {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::Float)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Float(f64::from(*self))
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        let wide = f64::from_dynamic(value)?;
        let narrow = wide as f32;
        if narrow.is_finite() || !wide.is_finite() {
            Ok(narrow)
        } else {
            Err(MapperError::invalid("f32", format!("out-of-range float {wide}")))
        }
    }
}

// -----------------------------------------------------------------------------
// Boolean, String

impl FieldValue for bool {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::Boolean)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Bool(*self)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Bool(v) => Ok(v),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl FieldValue for String {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::String)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Str(self)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::String(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Raw JSON

impl FieldValue for Map<String, Value> {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::RawObject)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Object(v) => Ok(v),
            other => Err(mismatch("raw object", &other)),
        }
    }
}

/// An opaque JSON array field, passed through unchanged.
///
/// `Vec<Value>` would be a list of unknown elements; this is the
/// `array`-typed counterpart of a `serde_json::Map` field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArray(pub Vec<Value>);

impl From<Vec<Value>> for RawArray {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self(value)
    }
}

impl FieldValue for RawArray {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive(PrimitiveKind::RawArray)
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Array(&self.0)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Array(v) => Ok(Self(v)),
            other => Err(mismatch("raw array", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Timestamp

impl FieldValue for DateTime<FixedOffset> {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::Timestamp
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Timestamp(self)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Timestamp(v) => Ok(v),
            DynamicValue::String(text) => parse_timestamp(&text)
                .map_err(|e| MapperError::invalid("timestamp", e)),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: FieldValue> FieldValue for Option<T> {
    const NULLABLE: bool = true;

    #[inline]
    fn semantic_type() -> SemanticType {
        T::semantic_type().nullable()
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Some(value) => value.as_value_ref(),
            None => ValueRef::Null,
        }
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Null => Ok(None),
            value => T::from_dynamic(value).map(Some),
        }
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    #[inline]
    fn semantic_type() -> SemanticType {
        T::semantic_type()
    }

    #[inline]
    fn as_value_ref(&self) -> ValueRef<'_> {
        T::as_value_ref(self)
    }

    #[inline]
    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        T::from_dynamic(value).map(Box::new)
    }

    #[inline]
    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Containers

impl<T: FieldValue> FieldValue for Vec<T> {
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::list_of(T::semantic_type())
    }

    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(T::as_value_ref).collect())
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| T::from_dynamic(item).map_err(|e| e.within_index(index)))
                .collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl<K, V, S> FieldValue for HashMap<K, V, S>
where
    K: FieldValue + Eq + Hash,
    V: FieldValue,
    S: BuildHasher + Default + 'static,
{
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::map_of(K::semantic_type(), V::semantic_type())
    }

    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(
            self.iter()
                .map(|(k, v)| (k.as_value_ref(), v.as_value_ref()))
                .collect(),
        )
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok::<_, MapperError>((K::from_dynamic(k)?, V::from_dynamic(v)?)))
                .collect(),
            other => Err(mismatch("map", &other)),
        }
    }
}

impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: FieldValue + Ord,
    V: FieldValue,
{
    #[inline]
    fn semantic_type() -> SemanticType {
        SemanticType::map_of(K::semantic_type(), V::semantic_type())
    }

    fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(
            self.iter()
                .map(|(k, v)| (k.as_value_ref(), v.as_value_ref()))
                .collect(),
        )
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError> {
        match value {
            DynamicValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok::<_, MapperError>((K::from_dynamic(k)?, V::from_dynamic(v)?)))
                .collect(),
            other => Err(mismatch("map", &other)),
        }
    }
}
