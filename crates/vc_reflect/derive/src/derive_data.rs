//! Provide some tools for parsing token stream.

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Member, Type};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// StructField

/// A struct field that will be part of the type information.
pub(crate) struct StructField<'a> {
    /// `foo` or `0`, used in `offset_of!(Self, #member)`.
    pub member: Member,
    /// The reflected field name.
    pub name: String,
    pub ty: &'a Type,
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// A parsed `#[derive(Reflect)]` input.
pub(crate) struct ReflectStruct<'a> {
    vc_reflect_path: syn::Path,
    ident: &'a Ident,
    generics: &'a Generics,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Reflect)]` only supports structs",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Reflect)]` only supports structs",
                ));
            }
        };

        check_repr(&input.attrs)?;

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`#[derive(Reflect)]` does not support lifetime parameters, reflected types are `'static`",
            ));
        }

        let mut fields = Vec::new();
        match &data.fields {
            Fields::Named(named) => {
                for field in &named.named {
                    if is_ignored(&field.attrs)? {
                        continue;
                    }
                    // Named fields always have an ident.
                    let Some(ident) = &field.ident else { continue };
                    fields.push(StructField {
                        member: Member::Named(ident.clone()),
                        name: ident.unraw().to_string(),
                        ty: &field.ty,
                    });
                }
            }
            Fields::Unnamed(unnamed) => {
                for (index, field) in unnamed.unnamed.iter().enumerate() {
                    if is_ignored(&field.attrs)? {
                        continue;
                    }
                    fields.push(StructField {
                        member: Member::Unnamed(syn::Index::from(index)),
                        name: index.to_string(),
                        ty: &field.ty,
                    });
                }
            }
            Fields::Unit => {}
        }

        Ok(Self {
            vc_reflect_path: crate::path::vc_reflect(),
            ident: &input.ident,
            generics: &input.generics,
            fields,
        })
    }

    #[inline]
    pub(crate) fn vc_reflect_path(&self) -> &syn::Path {
        &self.vc_reflect_path
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub(crate) fn generics(&self) -> &Generics {
        self.generics
    }

    #[inline]
    pub(crate) fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Whether the `Typed` implementation should use a generic cell.
    pub(crate) fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }
}

/// Reject `#[repr(packed)]`, its fields can sit at unaligned offsets.
fn check_repr(attrs: &[syn::Attribute]) -> syn::Result<()> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("packed") {
                return Err(meta.error(
                    "`#[derive(Reflect)]` does not support `#[repr(packed)]`, fields must be aligned",
                ));
            }
            // Skip the argument of `align(N)`.
            if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(())
}

/// Parse `#[reflect(ignore)]` on a field.
fn is_ignored(attrs: &[syn::Attribute]) -> syn::Result<bool> {
    let mut ignored = false;
    for attr in attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignored = true;
                Ok(())
            } else {
                Err(meta.error("unsupported reflect attribute, expected `ignore`"))
            }
        })?;
    }
    Ok(ignored)
}
