//! Record instance → JSON value.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;

use serde_json::{Map, Number, Value};

use crate::info::{PrimitiveKind, RecordDescriptor, SemanticType};
use crate::timestamp::format_timestamp;
use crate::value::ValueRef;
use crate::{DynRecord, FieldPath, MapperError, Record};

/// Serializes a record into a JSON object.
///
/// Fields appear in declaration order. Fields whose value is null
/// (`None`) are left out.
///
/// ```
/// use jsondto_mapper::{derive::Record, serialize};
///
/// #[derive(Record)]
/// struct Money {
///     amount: f64,
///     currency: Option<String>,
/// }
///
/// let json = serialize(&Money { amount: 2.5, currency: None }).unwrap();
/// assert_eq!(json, serde_json::json!({ "amount": 2.5 }));
/// ```
pub fn serialize<T: Record>(value: &T) -> Result<Value, MapperError> {
    serialize_record(value)
}

/// Serializes a record behind a trait object.
pub fn serialize_record(value: &dyn DynRecord) -> Result<Value, MapperError> {
    let info = value.record_type().descriptor()?;
    Serializer::default().record(info, value)
}

#[derive(Default)]
struct Serializer {
    path: FieldPath,
}

impl Serializer {
    #[cold]
    fn unsupported(&self, detail: impl Display) -> MapperError {
        MapperError::unsupported(detail).at(&self.path)
    }

    fn record(
        &mut self,
        info: &'static RecordDescriptor,
        value: &dyn DynRecord,
    ) -> Result<Value, MapperError> {
        let mut object = Map::with_capacity(info.len());

        for field in info {
            self.path.push_field(field.name());

            let Some(view) = value.field(field.name()) else {
                return Err(self.unsupported(format!(
                    "record `{}` does not expose field `{}`",
                    info.name(),
                    field.name()
                )));
            };

            let output = self.value(field.semantic_type(), view)?;
            if !output.is_null() {
                object.insert(field.name().to_string(), output);
            }

            self.path.pop();
        }

        Ok(Value::Object(object))
    }

    fn value(&mut self, ty: &SemanticType, view: ValueRef<'_>) -> Result<Value, MapperError> {
        use PrimitiveKind as P;
        use SemanticType as S;

        Ok(match (ty, view) {
            (_, ValueRef::Null) => Value::Null,
            (S::Nullable(inner), view) => self.value(inner, view)?,
            (S::Primitive(P::Integer), ValueRef::Int(v)) => Value::from(v),
            (S::Primitive(P::Integer), ValueRef::UInt(v)) => Value::from(v),
            (S::Primitive(P::Float), ValueRef::Float(v)) => match Number::from_f64(v) {
                Some(number) => Value::Number(number),
                None => {
                    return Err(MapperError::invalid("finite float", v).at(&self.path));
                }
            },
            (S::Primitive(P::Boolean), ValueRef::Bool(v)) => Value::Bool(v),
            (S::Primitive(P::String), ValueRef::Str(v)) => Value::String(v.into()),
            (S::Primitive(P::RawObject), ValueRef::Object(v)) => Value::Object(v.clone()),
            (S::Primitive(P::RawArray), ValueRef::Array(v)) => Value::Array(v.to_vec()),
            (S::Timestamp, ValueRef::Timestamp(v)) => Value::String(format_timestamp(v)),
            (S::Enumeration(info), ValueRef::Member(name)) => match info.member(name) {
                Some(name) => Value::String(name.into()),
                None => {
                    return Err(self.unsupported(format!(
                        "`{name}` is not a member of enumeration `{}`",
                        info.name()
                    )));
                }
            },
            (S::Record(info), ValueRef::Record(record)) => {
                if record.record_type() != *info {
                    return Err(self.unsupported(format!(
                        "cannot serialize record `{}` as record `{}`",
                        record.record_type().name(),
                        info.name()
                    )));
                }
                self.record(info.descriptor()?, record)?
            }
            (S::ListOf(element), ValueRef::List(items)) => {
                let mut array = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    self.path.push_index(index);
                    array.push(self.value(element, item)?);
                    self.path.pop();
                }
                Value::Array(array)
            }
            (S::MapOf(key_ty, value_ty), ValueRef::Map(entries)) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let key = self.key(key_ty, key)?;
                    self.path.push_key(key.as_str());
                    let output = self.value(value_ty, item)?;
                    self.path.pop();
                    object.insert(key, output);
                }
                Value::Object(object)
            }
            (ty, view) => {
                return Err(self.unsupported(format!(
                    "cannot serialize {} as {ty}",
                    view.kind_name()
                )));
            }
        })
    }

    /// Serializes a map key and renders it as an object key.
    fn key(&mut self, ty: &SemanticType, view: ValueRef<'_>) -> Result<String, MapperError> {
        match self.value(ty, view)? {
            Value::String(key) => Ok(key),
            Value::Number(key) => Ok(key.to_string()),
            Value::Bool(key) => Ok(key.to_string()),
            Value::Null => Err(self.unsupported("map key is null")),
            other => Err(self.unsupported(format!("map key serialized to {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use chrono::DateTime;
    use serde_json::json;

    use super::serialize;
    use crate::derive::{Enumeration, Record};
    use crate::info::{RecordDescriptor, RecordType, SemanticType};
    use crate::value::{DynamicRecord, DynamicValue, FieldValue, RawArray, ValueRef};
    use crate::{DynRecord, MapperError, Record};

    #[derive(Enumeration, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum Status {
        Open,
        #[dto(rename = "CLOSED")]
        Closed,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Line {
        sku: String,
        qty: u32,
    }

    #[derive(Record, Debug, PartialEq)]
    #[dto(rename = "PurchaseOrder")]
    struct Order {
        id: u64,
        status: Status,
        lines: Vec<Line>,
        by_status: BTreeMap<Status, Vec<i32>>,
        placed_at: Option<DateTime<chrono::FixedOffset>>,
        note: Option<String>,
        #[dto(rename = "extra")]
        raw: RawArray,
    }

    #[test]
    fn nested_record() {
        let order = Order {
            id: 9,
            status: Status::Closed,
            lines: vec![Line {
                sku: "a-1".into(),
                qty: 2,
            }],
            by_status: BTreeMap::from([(Status::Open, vec![1, 2])]),
            placed_at: Some(DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap()),
            note: None,
            raw: RawArray(vec![json!(1), json!("x")]),
        };

        let json = serialize(&order).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 9,
                "status": "CLOSED",
                "lines": [{ "sku": "a-1", "qty": 2 }],
                "by_status": { "Open": [1, 2] },
                "placed_at": "2024-01-02 03:04:05+0000",
                "extra": [1, "x"],
            })
        );

        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            ["id", "status", "lines", "by_status", "placed_at", "extra"]
        );
    }

    #[derive(Record)]
    struct Reading {
        value: f64,
        samples: Vec<Option<f32>>,
    }

    #[test]
    fn floats() {
        let json = serialize(&Reading {
            value: 0.5,
            samples: vec![Some(1.0), None],
        })
        .unwrap();
        assert_eq!(json, json!({ "value": 0.5, "samples": [1.0, null] }));

        let err = serialize(&Reading {
            value: 1.0,
            samples: vec![Some(f32::NAN)],
        })
        .unwrap_err();
        assert!(matches!(err, MapperError::InvalidValue { .. }));
        assert_eq!(err.path(), Some("samples[0]"));
    }

    #[derive(Record)]
    struct Scores {
        by_id: BTreeMap<i64, bool>,
        by_flag: BTreeMap<bool, String>,
    }

    #[test]
    fn map_keys() {
        let json = serialize(&Scores {
            by_id: BTreeMap::from([(-3, true), (10, false)]),
            by_flag: BTreeMap::from([(true, "yes".into())]),
        })
        .unwrap();
        assert_eq!(
            json,
            json!({
                "by_id": { "-3": true, "10": false },
                "by_flag": { "true": "yes" },
            })
        );
    }

    // Describes `count` as an integer but exposes it as a string.
    struct Liar;

    impl FieldValue for Liar {
        fn semantic_type() -> SemanticType {
            SemanticType::Record(RecordType::of::<Self>())
        }

        fn as_value_ref(&self) -> ValueRef<'_> {
            ValueRef::Record(self)
        }

        fn from_dynamic(_: DynamicValue) -> Result<Self, MapperError> {
            Ok(Self)
        }
    }

    impl DynRecord for Liar {
        fn record_type(&self) -> RecordType {
            RecordType::of::<Self>()
        }

        fn field(&self, name: &str) -> Option<ValueRef<'_>> {
            (name == "count").then_some(ValueRef::Str("three"))
        }
    }

    impl Record for Liar {
        const NAME: &'static str = "Liar";

        fn describe() -> Result<RecordDescriptor, MapperError> {
            RecordDescriptor::builder::<Self>()
                .field::<i32>("count", false)
                .field::<i32>("hidden", true)
                .build()
        }

        fn from_record(_: &mut DynamicRecord) -> Result<Self, MapperError> {
            Ok(Self)
        }
    }

    #[derive(Record)]
    struct Holder {
        inner: Vec<Liar>,
    }

    #[test]
    fn shape_mismatch_is_fatal() {
        let err = serialize(&Liar).unwrap_err();
        assert_eq!(
            err,
            MapperError::UnsupportedType {
                path: "count".into(),
                detail: "cannot serialize string as integer".into(),
            }
        );

        let err = serialize(&Holder { inner: vec![Liar] }).unwrap_err();
        assert_eq!(err.path(), Some("inner[0].count"));
    }
}
