use std::collections::HashSet;

use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

use super::VariantAttributes;

/// An enum annotated with `#[derive(Enumeration)]`.
pub(crate) struct EnumerationEnum<'a> {
    pub ident: &'a Ident,
    pub members: Vec<EnumerationMember<'a>>,
    pub mapper_path: syn::Path,
}

/// A unit variant and its member name.
pub(crate) struct EnumerationMember<'a> {
    pub ident: &'a Ident,
    pub name: LitStr,
}

impl<'a> EnumerationEnum<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &ast.data else {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`#[derive(Enumeration)]` only supports enums",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Enumeration)]` does not support generics",
            ));
        }

        if data.variants.is_empty() {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`#[derive(Enumeration)]` needs at least one variant",
            ));
        }

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(data.variants.len());

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.fields.span(),
                    "`#[derive(Enumeration)]` only supports unit variants",
                ));
            }

            let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
            let name = attrs
                .rename
                .unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));

            if !seen.insert(name.value()) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("duplicate member name `{}`", name.value()),
                ));
            }

            members.push(EnumerationMember {
                ident: &variant.ident,
                name,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            members,
            mapper_path: crate::path::jsondto_mapper(),
        })
    }

    #[inline]
    pub fn enumeration_name(&self) -> LitStr {
        LitStr::new(&self.ident.to_string(), self.ident.span())
    }
}
