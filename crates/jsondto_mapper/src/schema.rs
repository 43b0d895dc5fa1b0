//! Record type → JSON-Schema (draft-04).
//!
//! Nested records are inlined; no `$ref` is emitted, so a record that
//! contains itself has no schema.
//!
//! | semantic type | fragment |
//! |---|---|
//! | primitive | `{"type": "integer" \| "number" \| "boolean" \| "string" \| "object" \| "array"}` |
//! | timestamp, enumeration | `{"type": "string"}` |
//! | record | `{"type": "object", "properties": {..}}` |
//! | list | `{"type": "array", "items": <element>}` |
//! | map | `{"type": "object", "additionalProperties": <value>}` |
//! | nullable item or value | `<inner>` with `"type": [<inner type>, "null"]` |
//!
//! A record fragment carries `required` only as the value of a map.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;

use serde_json::{Map, Value};

use crate::info::{RecordDescriptor, SemanticType};
use crate::{MapperError, Record};

/// The `$schema` of derived documents.
pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Derives the schema document of `T`.
///
/// ```
/// use jsondto_mapper::{derive::Record, derive_schema};
/// use serde_json::json;
///
/// #[derive(Record)]
/// #[dto(rename = "Coordinate")]
/// struct Point {
///     x: f64,
///     y: f64,
///     label: Option<String>,
/// }
///
/// assert_eq!(
///     derive_schema::<Point>().unwrap(),
///     json!({
///         "$schema": "http://json-schema.org/draft-04/schema#",
///         "title": "Coordinate",
///         "type": "object",
///         "properties": {
///             "x": { "type": "number" },
///             "y": { "type": "number" },
///             "label": { "type": "string" },
///         },
///         "required": ["x", "y"],
///     }),
/// );
/// ```
pub fn derive_schema<T: Record>() -> Result<Value, MapperError> {
    let info = T::descriptor()?;
    let properties = SchemaDeriver::default().properties(info)?;

    let mut schema = Map::new();
    schema.insert("$schema".into(), DRAFT_04.into());
    schema.insert("title".into(), info.name().into());
    schema.insert("type".into(), "object".into());
    schema.insert("properties".into(), Value::Object(properties));
    insert_required(&mut schema, info);

    Ok(Value::Object(schema))
}

/// Derives the `properties` object of `T`.
pub fn record_properties<T: Record>() -> Result<Map<String, Value>, MapperError> {
    SchemaDeriver::default().properties(T::descriptor()?)
}

/// Names of the required fields of `T`, in declaration order.
pub fn record_required<T: Record>() -> Result<Vec<&'static str>, MapperError> {
    Ok(T::descriptor()?.required().collect())
}

fn insert_required(schema: &mut Map<String, Value>, info: &RecordDescriptor) {
    let required: Vec<Value> = info.required().map(Value::from).collect();
    // draft-04 forbids an empty `required`.
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Property,
    ListItem,
    MapValue,
}

#[derive(Default)]
struct SchemaDeriver {
    // Records being inlined, outermost first.
    stack: Vec<TypeId>,
}

impl SchemaDeriver {
    fn properties(
        &mut self,
        info: &'static RecordDescriptor,
    ) -> Result<Map<String, Value>, MapperError> {
        if self.stack.contains(&info.ty_id()) {
            return Err(MapperError::RecursiveRecord {
                record: info.name(),
            });
        }

        self.stack.push(info.ty_id());
        let mut properties = Map::with_capacity(info.len());
        for field in info {
            let fragment = self.fragment(field.semantic_type(), Position::Property)?;
            properties.insert(field.name().into(), Value::Object(fragment));
        }
        self.stack.pop();

        Ok(properties)
    }

    fn fragment(
        &mut self,
        ty: &SemanticType,
        position: Position,
    ) -> Result<Map<String, Value>, MapperError> {
        let mut fragment = Map::new();

        match ty {
            SemanticType::Primitive(kind) => {
                fragment.insert("type".into(), kind.schema_type().into());
            }
            SemanticType::Timestamp | SemanticType::Enumeration(_) => {
                fragment.insert("type".into(), "string".into());
            }
            SemanticType::Record(record) => {
                let info = record.descriptor()?;
                let properties = self.properties(info)?;
                fragment.insert("type".into(), "object".into());
                fragment.insert("properties".into(), Value::Object(properties));
                if position == Position::MapValue {
                    insert_required(&mut fragment, info);
                }
            }
            SemanticType::ListOf(element) => {
                let items = self.fragment(element, Position::ListItem)?;
                fragment.insert("type".into(), "array".into());
                fragment.insert("items".into(), Value::Object(items));
            }
            SemanticType::MapOf(_, value) => {
                let values = self.fragment(value, Position::MapValue)?;
                fragment.insert("type".into(), "object".into());
                fragment.insert("additionalProperties".into(), Value::Object(values));
            }
            SemanticType::Nullable(inner) => {
                // draft-04 spells nullability as a type union.
                fragment = self.fragment(inner, position)?;
                if let Some(ty) = fragment.get_mut("type") {
                    *ty = Value::Array(vec![ty.take(), Value::from("null")]);
                }
            }
        }

        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use chrono::{DateTime, FixedOffset};
    use serde_json::{Map, Value, json};

    use super::{derive_schema, record_properties, record_required};
    use crate::derive::{Enumeration, Record};
    use crate::value::RawArray;
    use crate::{MapperError, serialize};

    #[derive(Record)]
    struct Primitive {
        my_int: i32,
        my_str: String,
        my_float: f64,
        #[dto(default)]
        my_bool: bool,
        #[dto(default)]
        my_dict: Map<String, Value>,
    }

    #[derive(Record)]
    struct WithList {
        my_list: Vec<Primitive>,
    }

    #[derive(Record)]
    struct WithDefaultList {
        #[dto(default)]
        my_list: Vec<Primitive>,
    }

    #[derive(Record)]
    struct WithMap {
        my_dict: HashMap<String, Primitive>,
    }

    #[derive(Enumeration)]
    enum Kind {
        Small,
        Large,
    }

    #[derive(Record)]
    struct Mixed {
        kind: Kind,
        at: DateTime<FixedOffset>,
        raw: RawArray,
        grid: Vec<Vec<u8>>,
        nested: BTreeMap<String, Vec<HashMap<String, Primitive>>>,
        single: Option<Primitive>,
    }

    #[derive(Record)]
    struct Tree {
        value: i32,
        #[dto(default)]
        children: Vec<Tree>,
    }

    fn primitive_properties() -> Value {
        json!({
            "my_int": { "type": "integer" },
            "my_str": { "type": "string" },
            "my_float": { "type": "number" },
            "my_bool": { "type": "boolean" },
            "my_dict": { "type": "object" },
        })
    }

    #[test]
    fn primitives() {
        let schema = derive_schema::<Primitive>().unwrap();
        assert_eq!(schema["$schema"], "http://json-schema.org/draft-04/schema#");
        assert_eq!(schema["title"], "Primitive");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"], primitive_properties());
        assert_eq!(schema["required"], json!(["my_int", "my_str", "my_float"]));
        assert_eq!(
            record_required::<Primitive>().unwrap(),
            ["my_int", "my_str", "my_float"]
        );
    }

    #[test]
    fn nested_list() {
        let expected = json!({
            "my_list": {
                "type": "array",
                "items": { "type": "object", "properties": primitive_properties() },
            },
        });

        let schema = derive_schema::<WithList>().unwrap();
        assert_eq!(schema["properties"], expected);
        assert_eq!(schema["required"], json!(["my_list"]));

        let schema = derive_schema::<WithDefaultList>().unwrap();
        assert_eq!(schema["properties"], expected);
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn nested_map() {
        let properties = record_properties::<WithMap>().unwrap();
        assert_eq!(
            Value::Object(properties),
            json!({
                "my_dict": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "object",
                        "properties": primitive_properties(),
                        "required": ["my_int", "my_str", "my_float"],
                    },
                },
            })
        );
    }

    #[test]
    fn other_shapes() {
        let schema = derive_schema::<Mixed>().unwrap();
        let map_value = json!({
            "type": "object",
            "properties": primitive_properties(),
            "required": ["my_int", "my_str", "my_float"],
        });
        assert_eq!(
            schema["properties"],
            json!({
                "kind": { "type": "string" },
                "at": { "type": "string" },
                "raw": { "type": "array" },
                "grid": {
                    "type": "array",
                    "items": { "type": "array", "items": { "type": "integer" } },
                },
                "nested": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "array",
                        "items": { "type": "object", "additionalProperties": map_value },
                    },
                },
                "single": { "type": "object", "properties": primitive_properties() },
            })
        );
        assert_eq!(
            schema["required"],
            json!(["kind", "at", "raw", "grid", "nested"])
        );
    }

    #[test]
    fn recursive_record() {
        assert_eq!(
            derive_schema::<Tree>().unwrap_err(),
            MapperError::RecursiveRecord { record: "Tree" }
        );
    }

    #[derive(Record)]
    struct Incompatible {
        my_int: String,
        my_str: Vec<i32>,
    }

    #[test]
    fn consumable_by_validator() {
        let schema = derive_schema::<WithMap>().unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();

        let valid = serialize(&WithMap {
            my_dict: HashMap::from([(
                "a".into(),
                Primitive {
                    my_int: 1,
                    my_str: "s".into(),
                    my_float: 0.5,
                    my_bool: true,
                    my_dict: Map::new(),
                },
            )]),
        })
        .unwrap();
        assert!(validator.is_valid(&valid));

        let schema = derive_schema::<Primitive>().unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        let incompatible = serialize(&Incompatible {
            my_int: "one".into(),
            my_str: vec![1, 2],
        })
        .unwrap();
        assert!(!validator.is_valid(&incompatible));
        assert!(!validator.is_valid(&json!({ "my_int": 1, "my_str": "s" })));
    }

    #[derive(Record)]
    struct Readings {
        samples: Vec<Option<i32>>,
        tags: HashMap<String, Option<String>>,
        #[dto(default)]
        points: Vec<Option<Primitive>>,
    }

    #[test]
    fn nullable_items_and_values() {
        let schema = derive_schema::<Readings>().unwrap();
        assert_eq!(
            schema["properties"]["samples"],
            json!({ "type": "array", "items": { "type": ["integer", "null"] } })
        );
        assert_eq!(
            schema["properties"]["tags"],
            json!({
                "type": "object",
                "additionalProperties": { "type": ["string", "null"] },
            })
        );
        assert_eq!(
            schema["properties"]["points"]["items"],
            json!({ "type": ["object", "null"], "properties": primitive_properties() })
        );

        let readings = serialize(&Readings {
            samples: vec![Some(1), None],
            tags: HashMap::from([("a".into(), None), ("b".into(), Some("x".into()))]),
            points: vec![None],
        })
        .unwrap();
        assert_eq!(readings["samples"], json!([1, null]));
        assert_eq!(readings["tags"]["a"], Value::Null);

        let validator = jsonschema::validator_for(&schema).unwrap();
        assert!(validator.is_valid(&readings));
        assert!(!validator.is_valid(&json!({ "samples": ["x"], "tags": {} })));
        assert!(!validator.is_valid(&json!({ "samples": [], "tags": { "a": 1 } })));
    }
}
