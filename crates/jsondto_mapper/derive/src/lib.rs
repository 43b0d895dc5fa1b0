//! See following macros:
//!
//! - [`Record`](derive_record)
//! - [`Enumeration`](derive_enumeration)
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static DTO_ATTRIBUTE_NAME: &str = "dto";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` implements `FieldValue`, `DynRecord` and `Record`
/// for a struct with named fields. Every field type must implement
/// `FieldValue`.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Record)]
/// #[dto(rename = "Customer")]
/// struct CustomerDto { /* ... */ }
/// ```
///
/// - `rename = "Name"`: the record name (schema title). Defaults to the
///   type name.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Record)]
/// struct Order {
///     #[dto(rename = "orderId")]
///     id: u64,
///     #[dto(default)]
///     tags: Vec<String>,
///     #[dto(default = 1)]
///     quantity: u32,
///     #[dto(flatten)]
///     audit: Audit,
/// }
/// ```
///
/// - `rename = "key"`: the JSON key. Defaults to the field name.
/// - `default`: use `Default::default()` when the key is absent.
/// - `default = expr`: use `expr` when the key is absent.
/// - `flatten`: the field is a record whose fields are inherited. Cannot
///   be combined with the attributes above.
///
/// A field is required unless it has a default or an `Option` type.
///
/// ## Generics
///
/// Type parameters get a `FieldValue` bound. Lifetime parameters are not
/// supported.
#[proc_macro_derive(Record, attributes(dto))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let record = match derive_data::RecordStruct::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_record(&record).into()
}

/// # Enumeration Derivation
///
/// `#[derive(Enumeration)]` implements `Enumeration` and `FieldValue` for
/// a non-generic enum whose variants are all units. Members are mapped by
/// name.
///
/// ```rust, ignore
/// #[derive(Enumeration)]
/// enum Level {
///     Low,
///     #[dto(rename = "HIGH")]
///     High,
/// }
/// ```
///
/// - `rename = "NAME"` on a variant: the member name. Defaults to the
///   variant name.
#[proc_macro_derive(Enumeration, attributes(dto))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let enumeration = match derive_data::EnumerationEnum::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_enumeration(&enumeration).into()
}
