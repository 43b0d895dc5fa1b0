use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::LitStr;

use crate::derive_data::{FieldDefault, RecordField, RecordStruct};

/// Generates `FieldValue`, `DynRecord` and `Record` for a struct.
pub(crate) fn impl_record(info: &RecordStruct) -> TokenStream {
    let mapper_path = &info.mapper_path;
    let record_ = crate::path::record_(mapper_path);
    let dyn_record_ = crate::path::dyn_record_(mapper_path);
    let mapper_error_ = crate::path::mapper_error_(mapper_path);
    let field_value_ = crate::path::field_value_(mapper_path);
    let value_ref_ = crate::path::value_ref_(mapper_path);
    let dynamic_value_ = crate::path::dynamic_value_(mapper_path);
    let dynamic_record_ = crate::path::dynamic_record_(mapper_path);
    let semantic_type_ = crate::path::semantic_type_(mapper_path);
    let record_type_ = crate::path::record_type_(mapper_path);
    let record_descriptor_ = crate::path::record_descriptor_(mapper_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();

    let ident = info.ident;
    let record_name = info.record_name();
    let expected = LitStr::new(
        &format!("record `{}`", record_name.value()),
        record_name.span(),
    );

    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    let (flattened, fields): (Vec<&RecordField>, Vec<&RecordField>) =
        info.fields.iter().partition(|field| field.is_flatten());

    // DynRecord::field
    let field_arms = fields.iter().map(|field| {
        let member = field.ident();
        let json_name = field.json_name();
        quote! {
            #json_name => #option_::Some(#field_value_::as_value_ref(&self.#member)),
        }
    });
    let flattened_members = flattened.iter().map(|field| field.ident());

    // Record::describe
    let describe_steps = info.fields.iter().map(|field| {
        let ty = field.ty();
        if field.is_flatten() {
            quote! { .flatten::<#ty>()? }
        } else {
            let json_name = field.json_name();
            let has_default = field.default().is_some();
            quote! { .field::<#ty>(#json_name, #has_default) }
        }
    });

    // Record::from_record
    let record_ident = quote! { __record };
    let constructors = info.fields.iter().map(|field| {
        let member = field.ident();
        let ty = field.ty();
        let json_name = field.json_name();
        let value = if field.is_flatten() {
            quote! { <#ty as #record_>::from_record(#record_ident)? }
        } else {
            match field.default() {
                None => quote! {
                    #record_ident.take_required::<#ty>(#json_name)?
                },
                Some(FieldDefault::Expr(expr)) => quote! {
                    #record_ident.take_or_else::<#ty>(#json_name, || #expr)?
                },
                Some(FieldDefault::Trait(span)) => {
                    let default_ = crate::path::default_();
                    let default_fn = quote_spanned! { *span=> <#ty as #default_>::default };
                    quote! {
                        #record_ident.take_or_else::<#ty>(#json_name, #default_fn)?
                    }
                }
            }
        };
        quote! { #member: #value, }
    });

    quote! {
        const _: () = {
            impl #impl_generics #field_value_ for #ident #ty_generics #where_clause {
                #[inline]
                fn semantic_type() -> #semantic_type_ {
                    #semantic_type_::Record(#record_type_::of::<Self>())
                }

                #[inline]
                fn as_value_ref(&self) -> #value_ref_<'_> {
                    #value_ref_::Record(self)
                }

                fn from_dynamic(value: #dynamic_value_) -> #result_<Self, #mapper_error_> {
                    match value {
                        #dynamic_value_::Record(mut __record) => {
                            <Self as #record_>::from_record(&mut __record)
                        }
                        other => #result_::Err(#mapper_error_::invalid(#expected, other.kind_name())),
                    }
                }
            }

            impl #impl_generics #dyn_record_ for #ident #ty_generics #where_clause {
                #[inline]
                fn record_type(&self) -> #record_type_ {
                    #record_type_::of::<Self>()
                }

                fn field(&self, __name: &str) -> #option_<#value_ref_<'_>> {
                    match __name {
                        #(#field_arms)*
                        _ => #option_::None
                            #(.or_else(|| #dyn_record_::field(&self.#flattened_members, __name)))*,
                    }
                }
            }

            impl #impl_generics #record_ for #ident #ty_generics #where_clause {
                const NAME: &'static str = #record_name;

                fn describe() -> #result_<#record_descriptor_, #mapper_error_> {
                    #record_descriptor_::builder::<Self>()
                        #(#describe_steps)*
                        .build()
                }

                fn from_record(
                    #record_ident: &mut #dynamic_record_,
                ) -> #result_<Self, #mapper_error_> {
                    #result_::Ok(Self {
                        #(#constructors)*
                    })
                }
            }
        };
    }
}
