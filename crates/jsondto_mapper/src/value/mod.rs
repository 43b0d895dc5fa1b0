//! Field values and their two intermediate forms.
//!
//! - [`FieldValue`]: implemented by every supported field type; names its
//!   [`SemanticType`](crate::info::SemanticType) and converts to and from
//!   the forms below.
//! - [`ValueRef`]: a borrowed view of a live value, walked by the serializer.
//! - [`DynamicValue`] / [`DynamicRecord`]: owned values produced by the
//!   deserializer, consumed by [`Record::from_record`](crate::Record::from_record).

// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod impls;
mod value_ref;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic::{DynamicRecord, DynamicValue};
pub use impls::RawArray;
pub use value_ref::ValueRef;

use crate::MapperError;
use crate::info::SemanticType;

// -----------------------------------------------------------------------------
// FieldValue

/// A type usable as a record field.
///
/// Implemented for the primitive types, `chrono::DateTime<FixedOffset>`,
/// `Option`, `Box`, `Vec` and the standard maps; `#[derive(Record)]` and
/// `#[derive(Enumeration)]` implement it for their types.
pub trait FieldValue: Sized + 'static {
    /// Whether the type has a null value. Nullable fields are never
    /// required.
    const NULLABLE: bool = false;

    fn semantic_type() -> SemanticType;

    fn as_value_ref(&self) -> ValueRef<'_>;

    fn from_dynamic(value: DynamicValue) -> Result<Self, MapperError>;

    /// The value used when the field is absent from the input and has no
    /// declared default.
    #[inline]
    fn absent() -> Option<Self> {
        None
    }
}
