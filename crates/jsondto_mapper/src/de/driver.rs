use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use serde_json::Value;

use crate::de::coerce;
use crate::diagnostics::{LogObserver, Observer};
use crate::info::{RecordDescriptor, SemanticType};
use crate::timestamp::{TimestampError, parse_timestamp};
use crate::value::{DynamicRecord, DynamicValue};
use crate::{FieldPath, MapperError, Record};

/// Drives deserialization of one input value.
///
/// Holds the optional [`Observer`] receiving recoverable failures; without
/// one, failures are logged through [`LogObserver`].
///
/// ## Rules
///
/// - A field is read only if its key is present; `null` counts as absent.
/// - Keys without a matching field are ignored.
/// - Primitives are coerced to the declared kind (`"42"` reads as an integer).
/// - An empty timestamp string is absent. A malformed one is absent and
///   reported to the observer.
/// - An unknown enumeration member is fatal.
pub struct DeserializeDriver<'a> {
    observer: Option<&'a mut dyn Observer>,
    path: FieldPath,
}

impl Default for DeserializeDriver<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DeserializeDriver<'a> {
    /// Create a driver that logs recoverable failures.
    #[inline]
    pub const fn new() -> Self {
        Self {
            observer: None,
            path: FieldPath::new(),
        }
    }

    /// Create a driver reporting recoverable failures to `observer`.
    #[inline]
    pub fn with_observer(observer: &'a mut dyn Observer) -> Self {
        Self {
            observer: Some(observer),
            path: FieldPath::new(),
        }
    }

    /// Deserializes a record of type `T`.
    pub fn deserialize<T: Record>(mut self, input: &Value) -> Result<T, MapperError> {
        let info = T::descriptor()?;
        let mut record = self.deserialize_dynamic(info, input)?;
        T::from_record(&mut record)
    }

    /// Reads the fields of `info` present in `input`, without building an
    /// instance.
    pub fn deserialize_dynamic(
        &mut self,
        info: &'static RecordDescriptor,
        input: &Value,
    ) -> Result<DynamicRecord, MapperError> {
        let Value::Object(object) = input else {
            return Err(MapperError::invalid(
                format!("object for record `{}`", info.name()),
                coerce::describe(input),
            )
            .at(&self.path));
        };

        let mut record = DynamicRecord::with_capacity(info.name(), info.len());

        for field in info {
            let raw = match object.get(field.name()) {
                None | Some(Value::Null) => continue,
                Some(raw) => raw,
            };

            self.path.push_field(field.name());
            if let Some(value) = self.read_value(field.semantic_type(), raw)? {
                record.insert(field.name(), value);
            }
            self.path.pop();
        }

        Ok(record)
    }

    /// Reads one value; `None` means absent.
    fn read_value(
        &mut self,
        ty: &SemanticType,
        raw: &Value,
    ) -> Result<Option<DynamicValue>, MapperError> {
        if raw.is_null() {
            return Ok(Some(DynamicValue::Null));
        }

        let value = match ty {
            SemanticType::Primitive(kind) => {
                coerce::primitive(*kind, raw).map_err(|e| e.at(&self.path))?
            }
            SemanticType::Nullable(inner) => return self.read_value(inner, raw),
            SemanticType::Timestamp => return Ok(self.read_timestamp(raw)),
            SemanticType::Enumeration(info) => match raw {
                Value::String(name) => match info.member(name) {
                    Some(member) => DynamicValue::Member(member),
                    None => {
                        return Err(MapperError::unknown_member(info.name(), name).at(&self.path));
                    }
                },
                other => {
                    return Err(MapperError::invalid(
                        format!("member name of enumeration `{}`", info.name()),
                        coerce::describe(other),
                    )
                    .at(&self.path));
                }
            },
            SemanticType::Record(info) => {
                DynamicValue::Record(self.deserialize_dynamic(info.descriptor()?, raw)?)
            }
            SemanticType::ListOf(element) => {
                let Value::Array(items) = raw else {
                    return Err(self.mismatch("array", raw));
                };
                let mut list = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push_index(index);
                    list.push(self.read_value(element, item)?.unwrap_or(DynamicValue::Null));
                    self.path.pop();
                }
                DynamicValue::List(list)
            }
            SemanticType::MapOf(key_ty, value_ty) => {
                let Value::Object(entries) = raw else {
                    return Err(self.mismatch("object", raw));
                };
                let mut map = Vec::with_capacity(entries.len());
                for (key, item) in entries {
                    self.path.push_key(key.as_str());
                    let key = self.read_value(key_ty, &Value::String(key.clone()))?;
                    let item = self.read_value(value_ty, item)?;
                    self.path.pop();
                    if let Some(key) = key {
                        map.push((key, item.unwrap_or(DynamicValue::Null)));
                    }
                }
                DynamicValue::Map(map)
            }
        };

        Ok(Some(value))
    }

    fn read_timestamp(&mut self, raw: &Value) -> Option<DynamicValue> {
        let result = match raw {
            Value::String(text) if text.is_empty() => return None,
            Value::String(text) => parse_timestamp(text),
            other => Err(TimestampError::NotText(coerce::describe(other))),
        };

        match result {
            Ok(value) => Some(DynamicValue::Timestamp(value)),
            Err(error) => {
                let raw = match raw {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                match self.observer.as_deref_mut() {
                    Some(observer) => observer.malformed_timestamp(&self.path, &raw, &error),
                    None => LogObserver.malformed_timestamp(&self.path, &raw, &error),
                }
                None
            }
        }
    }

    #[cold]
    fn mismatch(&self, expected: &str, raw: &Value) -> MapperError {
        MapperError::invalid(expected, coerce::describe(raw)).at(&self.path)
    }
}
