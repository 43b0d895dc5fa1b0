use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Field, Fields, Generics, Ident, LitStr, Type, WhereClause, parse_quote,
};

use super::{FieldAttributes, FieldDefault, TypeAttributes};

// -----------------------------------------------------------------------------
// Define

/// A struct annotated with `#[derive(Record)]`.
pub(crate) struct RecordStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<RecordField<'a>>,
    /// Path of the runtime crate, see [`crate::path::jsondto_mapper`].
    pub mapper_path: syn::Path,
}

/// A named field of a record.
pub(crate) struct RecordField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// RecordField Implementation

impl RecordField<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        // Only named fields are collected.
        self.data.ident.as_ref().unwrap_or_else(|| unreachable!())
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The JSON key: the renamed key, or the field name without `r#`.
    pub fn json_name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(lit) => lit.clone(),
            None => {
                let ident = self.ident();
                let name = ident.to_string();
                let name = name.strip_prefix("r#").unwrap_or(&name);
                LitStr::new(name, ident.span())
            }
        }
    }

    #[inline]
    pub fn is_flatten(&self) -> bool {
        self.attrs.flatten.is_some()
    }

    #[inline]
    pub fn default(&self) -> Option<&FieldDefault> {
        self.attrs.default.as_ref()
    }
}

// -----------------------------------------------------------------------------
// RecordStruct Implementation

impl<'a> RecordStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &ast.data else {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`#[derive(Record)]` only supports structs",
            ));
        };

        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new(
                data.fields.span(),
                "`#[derive(Record)]` only supports structs with named fields",
            ));
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`#[derive(Record)]` does not support lifetime parameters",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let fields = named
            .named
            .iter()
            .map(|data| {
                Ok(RecordField {
                    data,
                    attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs,
            fields,
            mapper_path: crate::path::jsondto_mapper(),
        })
    }

    /// The record name: the renamed name, or the type name.
    pub fn record_name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(lit) => lit.clone(),
            None => LitStr::new(&self.ident.to_string(), self.ident.span()),
        }
    }

    /// The user's where clause, plus a `FieldValue` bound on every type
    /// parameter.
    pub fn where_clause(&self) -> WhereClause {
        let mut clause = self
            .generics
            .where_clause
            .clone()
            .unwrap_or_else(|| WhereClause {
                where_token: Default::default(),
                predicates: Punctuated::new(),
            });

        let field_value_ = crate::path::field_value_(&self.mapper_path);
        for param in self.generics.type_params() {
            let ident = &param.ident;
            clause
                .predicates
                .push(parse_quote! { #ident: #field_value_ });
        }

        clause
    }
}
