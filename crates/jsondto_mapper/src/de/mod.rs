//! JSON value → record instance.
//!
//! Deserialization runs in two steps. [`DeserializeDriver`] walks the JSON
//! input along the record's descriptor and collects present fields into a
//! [`DynamicRecord`](crate::value::DynamicRecord), coercing primitives on
//! the way. [`Record::from_record`](crate::Record::from_record) then builds
//! the instance in one constructor call, filling absent fields with their
//! defaults.

// -----------------------------------------------------------------------------
// Modules

mod coerce;
mod driver;

// -----------------------------------------------------------------------------
// Exports

pub use driver::DeserializeDriver;

use serde_json::Value;

use crate::{MapperError, Record};

/// Deserializes a record, reporting malformed timestamps through
/// [`LogObserver`](crate::diagnostics::LogObserver).
///
/// ```
/// use jsondto_mapper::{derive::Record, deserialize};
///
/// #[derive(Record, Debug, PartialEq)]
/// struct Money {
///     amount: f64,
///     #[dto(default = String::from("EUR"))]
///     currency: String,
/// }
///
/// let money: Money = deserialize(&serde_json::json!({ "amount": "2.5" })).unwrap();
/// assert_eq!(money, Money { amount: 2.5, currency: "EUR".into() });
/// ```
#[inline]
pub fn deserialize<T: Record>(input: &Value) -> Result<T, MapperError> {
    DeserializeDriver::new().deserialize(input)
}
