//! Derive macro for the `Fragment` trait.
//!
//! Automatically generates `fragment()` from a struct's field definitions.
//! No hand-written selection trees needed: the struct shape IS the fragment.
//!
//! # Usage
//!
//! ```ignore
//! use fragments::Fragment;
//!
//! #[derive(Fragment)]
//! struct Page {
//!     _id: String,
//!     title: String,
//!     #[fragment(nested)]
//!     created_by: Option<User>,
//!     #[fragment(rename = "another: slug")]
//!     other_slug: String,
//! }
//! ```
//!
//! Generates the tree for `_id,title,createdBy { <User::fragment()> },another: slug`.

use heck::ToLowerCamelCase;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitStr, Type};

/// Derive `Fragment` for a struct.
///
/// Each field becomes a selection entry:
/// - Plain fields → `camelCaseName` (leading underscores kept)
/// - `#[fragment(nested)]` fields → `camelCaseName { <InnerType::fragment()> }`
/// - `#[fragment(rename = "...")]` → the given key, verbatim
/// - `#[fragment(skip)]` → left out
#[proc_macro_derive(Fragment, attributes(fragment))]
pub fn derive_fragment(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Fragment can only be derived on structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Fragment can only be derived on structs")
                .to_compile_error()
                .into();
        }
    };

    let mut entries = Vec::new();

    for field in fields {
        let attrs = match FieldAttrs::parse(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };
        if attrs.skip {
            continue;
        }

        let key = match attrs.rename {
            Some(key) => key,
            None => selection_key(field),
        };

        if attrs.nested {
            // Extract the inner type (unwrap Option<T>, Vec<T>, Box<T>).
            let inner_ty = unwrap_type(&field.ty);
            entries.push(quote! {
                .nested(#key, <#inner_ty as ::fragments::Fragment>::fragment())
            });
        } else {
            entries.push(quote! {
                .field(#key)
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics ::fragments::Fragment for #name #ty_generics #where_clause {
            fn fragment() -> ::fragments::SelectionTree {
                ::fragments::SelectionTree::new()
                    #(#entries)*
            }
        }
    };

    expanded.into()
}

#[derive(Default)]
struct FieldAttrs {
    nested: bool,
    skip: bool,
    rename: Option<String>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("fragment") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `nested`, `skip` or `rename = \"...\"`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

/// Convert a Rust snake_case field name to a camelCase selection key.
/// Leading underscores survive (`_id` stays `_id`), raw identifiers are
/// unwrapped (`r#type` → `type`).
fn selection_key(field: &Field) -> String {
    let rust_name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();
    let clean_name = rust_name.strip_prefix("r#").unwrap_or(&rust_name);
    let rest = clean_name.trim_start_matches('_');
    let underscores = &clean_name[..clean_name.len() - rest.len()];
    format!("{}{}", underscores, rest.to_lower_camel_case())
}

/// Unwrap wrapper types to get the "leaf" type for nested selections.
/// `Option<Box<Foo>>` → `Foo`, `Vec<Bar>` → `Bar`, `Option<Vec<Baz>>` → `Baz`, etc.
fn unwrap_type(ty: &Type) -> &Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            let ident = segment.ident.to_string();
            if ident == "Option" || ident == "Vec" || ident == "Box" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return unwrap_type(inner);
                    }
                }
            }
        }
    }
    ty
}
