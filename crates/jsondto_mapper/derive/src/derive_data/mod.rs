//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod enumeration_enum;
mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldDefault, TypeAttributes, VariantAttributes};

pub(crate) use enumeration_enum::{EnumerationEnum, EnumerationMember};
pub(crate) use record_struct::{RecordField, RecordStruct};
