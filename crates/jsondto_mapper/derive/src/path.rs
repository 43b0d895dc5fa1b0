//! Paths of the runtime items referenced by generated code.
//!
//! Kept in one place so that moving an item in `jsondto_mapper` only
//! touches this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `jsondto_mapper` crate.
///
/// 1. For crates that depend on `jsondto_mapper`, `::jsondto_mapper` is returned.
/// 2. For crates that depend on `jsondto`, `::jsondto::mapper` is returned.
/// 3. Otherwise `::jsondto_mapper` is returned, which may be incorrect.
///
/// Reads the builder's `Cargo.toml`, so the result is computed once per
/// derive and passed around.
pub(crate) fn jsondto_mapper() -> syn::Path {
    jsondto_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("jsondto_mapper"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn record_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::Record }
}

#[inline(always)]
pub(crate) fn dyn_record_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::DynRecord }
}

#[inline(always)]
pub(crate) fn enumeration_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::Enumeration }
}

#[inline(always)]
pub(crate) fn mapper_error_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::MapperError }
}

#[inline(always)]
pub(crate) fn field_value_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::value::FieldValue }
}

#[inline(always)]
pub(crate) fn value_ref_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::value::ValueRef }
}

#[inline(always)]
pub(crate) fn dynamic_value_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::value::DynamicValue }
}

#[inline(always)]
pub(crate) fn dynamic_record_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::value::DynamicRecord }
}

#[inline(always)]
pub(crate) fn semantic_type_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::info::SemanticType }
}

#[inline(always)]
pub(crate) fn record_type_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::info::RecordType }
}

#[inline(always)]
pub(crate) fn enum_type_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::info::EnumType }
}

#[inline(always)]
pub(crate) fn record_descriptor_(mapper_path: &syn::Path) -> TokenStream {
    quote! { #mapper_path::info::RecordDescriptor }
}

// -----------------------------------------------------------------------------
// Prelude

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
