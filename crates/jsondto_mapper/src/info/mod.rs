//! Compile-time shape information of mapped types.
//!
//! ## Menu
//!
//! - [`SemanticType`]: the closed tag describing a field's declared shape.
//!     - [`PrimitiveKind`]: integer, float, boolean, string, raw object, raw array.
//!     - [`EnumType`]: name and members of an [`Enumeration`](crate::Enumeration).
//!     - [`RecordType`]: identity of a nested [`Record`](crate::Record), with a lazy
//!       accessor to its descriptor (records may contain themselves).
//! - [`FieldDescriptor`]: JSON key, semantic type and required flag of one field.
//! - [`RecordDescriptor`]: ordered fields of a record, with inherited fields spliced in.
//! - [`RecordBuilder`]: used by `#[derive(Record)]` to assemble a descriptor.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod record_info;
mod semantic_type;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::FieldDescriptor;
pub use record_info::{RecordBuilder, RecordDescriptor};
pub use semantic_type::{EnumType, PrimitiveKind, RecordType, SemanticType};
