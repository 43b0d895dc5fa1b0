//! Parsing of `#[dto(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr};

use crate::DTO_ATTRIBUTE_NAME;

/// Visits every item of every `#[dto(...)]` attribute.
fn parse_dto_attrs(
    attrs: &[Attribute],
    mut f: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(DTO_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut f)?;
        }
    }
    Ok(())
}

fn parse_rename(meta: &ParseNestedMeta, slot: &mut Option<LitStr>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `rename`"));
    }
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "`rename` cannot be empty"));
    }
    *slot = Some(lit);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the record type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[dto(rename = "Name")]`
    pub rename: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_dto_attrs(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else {
                Err(meta.error("unsupported record attribute, expected `rename`"))
            }
        })?;
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// The declared default of a field.
pub(crate) enum FieldDefault {
    /// `#[dto(default)]`
    Trait(Span),
    /// `#[dto(default = expr)]`
    Expr(Box<Expr>),
}

/// Attributes on a record field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[dto(rename = "key")]`
    pub rename: Option<LitStr>,
    pub default: Option<FieldDefault>,
    /// `#[dto(flatten)]`
    pub flatten: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_dto_attrs(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else if meta.path.is_ident("default") {
                if this.default.is_some() {
                    return Err(meta.error("duplicate `default`"));
                }
                this.default = Some(if meta.input.peek(syn::Token![=]) {
                    FieldDefault::Expr(Box::new(meta.value()?.parse()?))
                } else {
                    FieldDefault::Trait(meta.path.span())
                });
                Ok(())
            } else if meta.path.is_ident("flatten") {
                if this.flatten.is_some() {
                    return Err(meta.error("duplicate `flatten`"));
                }
                this.flatten = Some(meta.path.span());
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported field attribute, expected `rename`, `default` or `flatten`",
                ))
            }
        })?;

        if let Some(span) = this.flatten
            && (this.rename.is_some() || this.default.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`flatten` cannot be combined with `rename` or `default`",
            ));
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Attributes on an enumeration variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    /// `#[dto(rename = "NAME")]`
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        parse_dto_attrs(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else {
                Err(meta.error("unsupported variant attribute, expected `rename`"))
            }
        })?;
        Ok(this)
    }
}
