use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::EnumerationEnum;

/// Generates `Enumeration` and `FieldValue` for a unit-only enum.
pub(crate) fn impl_enumeration(info: &EnumerationEnum) -> TokenStream {
    let mapper_path = &info.mapper_path;
    let enumeration_ = crate::path::enumeration_(mapper_path);
    let mapper_error_ = crate::path::mapper_error_(mapper_path);
    let field_value_ = crate::path::field_value_(mapper_path);
    let value_ref_ = crate::path::value_ref_(mapper_path);
    let dynamic_value_ = crate::path::dynamic_value_(mapper_path);
    let semantic_type_ = crate::path::semantic_type_(mapper_path);
    let enum_type_ = crate::path::enum_type_(mapper_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();

    let ident = info.ident;
    let name = info.enumeration_name();
    let expected = format!("member of `{}`", name.value());

    let variants: Vec<_> = info.members.iter().map(|m| m.ident).collect();
    let names: Vec<_> = info.members.iter().map(|m| &m.name).collect();

    quote! {
        const _: () = {
            impl #enumeration_ for #ident {
                const NAME: &'static str = #name;

                const MEMBERS: &'static [&'static str] = &[#(#names),*];

                #[inline]
                fn member_name(&self) -> &'static str {
                    match self {
                        #(Self::#variants => #names,)*
                    }
                }

                fn from_member_name(name: &str) -> #option_<Self> {
                    match name {
                        #(#names => #option_::Some(Self::#variants),)*
                        _ => #option_::None,
                    }
                }
            }

            impl #field_value_ for #ident {
                #[inline]
                fn semantic_type() -> #semantic_type_ {
                    #semantic_type_::Enumeration(#enum_type_::of::<Self>())
                }

                #[inline]
                fn as_value_ref(&self) -> #value_ref_<'_> {
                    #value_ref_::Member(<Self as #enumeration_>::member_name(self))
                }

                fn from_dynamic(value: #dynamic_value_) -> #result_<Self, #mapper_error_> {
                    let name: &str = match &value {
                        #dynamic_value_::Member(name) => *name,
                        #dynamic_value_::String(name) => name.as_str(),
                        other => {
                            return #result_::Err(#mapper_error_::invalid(#expected, other.kind_name()));
                        }
                    };
                    match <Self as #enumeration_>::from_member_name(name) {
                        #option_::Some(this) => #result_::Ok(this),
                        #option_::None => #result_::Err(#mapper_error_::unknown_member(#name, name)),
                    }
                }
            }
        };
    }
}
