//! Conversions of JSON scalars to declared primitive kinds.

use alloc::string::{String, ToString};

use serde_json::{Number, Value};

use crate::MapperError;
use crate::info::PrimitiveKind;
use crate::value::DynamicValue;

/// Converts `raw` to `kind`, or fails with a location-free
/// [`MapperError::InvalidValue`].
pub(crate) fn primitive(kind: PrimitiveKind, raw: &Value) -> Result<DynamicValue, MapperError> {
    let coerced = match kind {
        PrimitiveKind::Integer => integer(raw),
        PrimitiveKind::Float => float(raw).map(DynamicValue::Float),
        PrimitiveKind::Boolean => boolean(raw).map(DynamicValue::Bool),
        PrimitiveKind::String => string(raw).map(DynamicValue::String),
        PrimitiveKind::RawObject => match raw {
            Value::Object(object) => Some(DynamicValue::Object(object.clone())),
            _ => None,
        },
        PrimitiveKind::RawArray => match raw {
            Value::Array(array) => Some(DynamicValue::Array(array.clone())),
            _ => None,
        },
    };

    coerced.ok_or_else(|| MapperError::invalid(kind, describe(raw)))
}

/// Short description of a JSON value for error messages.
pub(crate) fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".into(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => alloc::format!("string {v:?}"),
        Value::Array(_) => "array".into(),
        Value::Object(_) => "object".into(),
    }
}

fn integer(raw: &Value) -> Option<DynamicValue> {
    match raw {
        Value::Number(number) => integer_from_number(number),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(v) = text.parse::<i64>() {
                Some(DynamicValue::Int(v))
            } else if let Ok(v) = text.parse::<u64>() {
                Some(DynamicValue::UInt(v))
            } else {
                integral(text.parse::<f64>().ok()?)
            }
        }
        Value::Bool(v) => Some(DynamicValue::Int(i64::from(*v))),
        _ => None,
    }
}

fn integer_from_number(number: &Number) -> Option<DynamicValue> {
    if let Some(v) = number.as_i64() {
        Some(DynamicValue::Int(v))
    } else if let Some(v) = number.as_u64() {
        Some(DynamicValue::UInt(v))
    } else {
        integral(number.as_f64()?)
    }
}

// Whole floats within `i64` only; `1.5` is not an integer.
fn integral(v: f64) -> Option<DynamicValue> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    if v.is_finite() && v.fract() == 0.0 && (-LIMIT..LIMIT).contains(&v) {
        Some(DynamicValue::Int(v as i64))
    } else {
        None
    }
}

fn float(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(v) => Some(*v),
        Value::Number(number) => number.as_f64().map(|v| v != 0.0),
        Value::String(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") || text == "1" {
                Some(true)
            } else if text.eq_ignore_ascii_case("false") || text == "0" {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(v) => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::primitive;
    use crate::MapperError;
    use crate::info::PrimitiveKind::{self, Boolean, Float, Integer, RawArray, RawObject};
    use crate::value::DynamicValue;

    fn ok(kind: PrimitiveKind, raw: serde_json::Value) -> DynamicValue {
        primitive(kind, &raw).unwrap()
    }

    fn fails(kind: PrimitiveKind, raw: serde_json::Value) -> bool {
        matches!(primitive(kind, &raw), Err(MapperError::InvalidValue { .. }))
    }

    #[test]
    fn integers() {
        assert_eq!(ok(Integer, json!(-4)), DynamicValue::Int(-4));
        assert_eq!(ok(Integer, json!(u64::MAX)), DynamicValue::UInt(u64::MAX));
        assert_eq!(ok(Integer, json!(3.0)), DynamicValue::Int(3));
        assert_eq!(ok(Integer, json!(" 42 ")), DynamicValue::Int(42));
        assert_eq!(ok(Integer, json!("1e3")), DynamicValue::Int(1000));
        assert_eq!(ok(Integer, json!(true)), DynamicValue::Int(1));
        assert!(fails(Integer, json!(1.5)));
        assert!(fails(Integer, json!("4x")));
        assert!(fails(Integer, json!(1e300)));
        assert!(fails(Integer, json!([1])));
    }

    #[test]
    fn floats() {
        assert_eq!(ok(Float, json!(2)), DynamicValue::Float(2.0));
        assert_eq!(ok(Float, json!("0.25")), DynamicValue::Float(0.25));
        assert!(fails(Float, json!("NaN")));
        assert!(fails(Float, json!("inf")));
        assert!(fails(Float, json!(true)));
        assert!(fails(Float, json!({})));
    }

    #[test]
    fn booleans() {
        assert_eq!(ok(Boolean, json!(0)), DynamicValue::Bool(false));
        assert_eq!(ok(Boolean, json!(-2.5)), DynamicValue::Bool(true));
        assert_eq!(ok(Boolean, json!("TRUE")), DynamicValue::Bool(true));
        assert_eq!(ok(Boolean, json!("0")), DynamicValue::Bool(false));
        assert!(fails(Boolean, json!("yes")));
    }

    #[test]
    fn strings() {
        let kind = PrimitiveKind::String;
        assert_eq!(ok(kind, json!(12)), DynamicValue::String("12".into()));
        assert_eq!(ok(kind, json!(false)), DynamicValue::String("false".into()));
        assert!(fails(kind, json!(["a"])));
    }

    #[test]
    fn raw_values_are_not_coerced() {
        assert_eq!(
            ok(RawObject, json!({ "a": [1] })),
            DynamicValue::Object(json!({ "a": [1] }).as_object().unwrap().clone())
        );
        assert!(fails(RawObject, json!([])));
        assert!(fails(RawArray, json!({})));
        assert!(fails(RawArray, json!("[]")));
    }
}
