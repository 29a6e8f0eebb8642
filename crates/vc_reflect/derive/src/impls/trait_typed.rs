use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation code for `Typed`
///
/// Each field becomes a `NamedField` carrying `offset_of!(Self, field)`.
/// Type parameters receive a `Typed` bound.
///
/// The impl is `unsafe`: it is sound because the info is built for `Self`
/// from its own fields, and packed structs are rejected before this point.
pub(crate) fn impl_trait_typed(reflect_struct: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = reflect_struct.vc_reflect_path();
    let trait_typed_ = crate::path::typed_(vc_reflect_path);
    let type_info_ = crate::path::type_info_(vc_reflect_path);
    let struct_info_ = crate::path::struct_info_(vc_reflect_path);
    let named_field_ = crate::path::named_field_(vc_reflect_path);

    let field_tokens = reflect_struct.fields().iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        let member = &field.member;
        quote! {
            #named_field_::new::<#ty>(#name, ::core::mem::offset_of!(Self, #member))
        }
    });

    let type_info_tokens = quote! {
        #type_info_::Struct(#struct_info_::new::<Self>(&[
            #(#field_tokens,)*
        ]))
    };

    let inner_cell_tokens = if reflect_struct.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let mut generics = reflect_struct.generics().clone();
    let type_params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: #trait_typed_));
    }

    let real_ident = reflect_struct.ident();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #[allow(unsafe_code)]
        unsafe impl #impl_generics #trait_typed_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
