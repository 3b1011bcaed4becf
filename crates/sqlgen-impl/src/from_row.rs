// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(FromRow)]` for named structs.
//!
//! Each field reads the column its naming strategy maps it to:
//!
//! | Field attribute | Decoded from |
//! |-----------------|--------------|
//! | *(none)* | the field name under `naming`, via `FromSqlValue` |
//! | `rename = "col"` | `col` |
//! | `nested` / `nested = "prefix"` | `prefix.*` columns via `FromRow` |
//! | `default` | the column when present, `Default` otherwise |
//! | `skip` | always `Default` |

use darling::{
    FromDeriveInput, FromField,
    ast::{Data, Style},
    util::Override
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type, parse_macro_input};

use crate::utils::meta::Naming;

/// Struct-level `#[from_row(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(from_row))]
pub struct RowDef {
    ident:    Ident,
    generics: Generics,
    data:     Data<(), RowField>,

    /// Column naming for fields without `rename`.
    #[darling(default)]
    naming: Naming
}

/// Field-level `#[from_row(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(from_row))]
pub struct RowField {
    ident: Option<Ident>,
    ty:    Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    nested: Option<Override<String>>,

    #[darling(default)]
    default: bool,

    #[darling(default)]
    skip: bool
}

/// How one field is filled.
#[derive(Debug, PartialEq, Eq)]
enum Source {
    Column(String),
    Optional(String),
    Nested(String),
    Skipped
}

impl RowField {
    fn source(&self, naming: Naming) -> darling::Result<Source> {
        let column = match (&self.rename, &self.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => naming.column(ident),
            (None, None) => return Err(darling::Error::unsupported_shape("tuple field"))
        };

        match (self.skip, &self.nested, self.default) {
            (true, None, false) => Ok(Source::Skipped),
            (true, ..) => Err(darling::Error::custom("`skip` cannot be combined with `nested` or `default`")),
            (false, Some(_), true) => Err(darling::Error::custom("`nested` cannot be combined with `default`")),
            (false, Some(Override::Explicit(prefix)), false) => Ok(Source::Nested(prefix.clone())),
            (false, Some(Override::Inherit), false) => Ok(Source::Nested(column)),
            (false, None, true) => Ok(Source::Optional(column)),
            (false, None, false) => Ok(Source::Column(column))
        }
    }
}

/// Main entry point for the `FromRow` derive.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RowDef::from_derive_input(&input).and_then(|def| generate(&def)) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into()
    }
}

/// `impl ::sqlgen::FromRow` for `def`.
///
/// # Errors
///
/// Anything but a struct with named fields, or conflicting field
/// attributes reported per field.
pub fn generate(def: &RowDef) -> darling::Result<TokenStream2> {
    let fields = match def.data.as_ref().take_struct() {
        Some(fields) if fields.style == Style::Struct => fields,
        _ => {
            return Err(
                darling::Error::custom("`FromRow` requires a struct with named fields").with_span(&def.ident)
            );
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut inits = Vec::with_capacity(fields.len());
    for field in fields.fields {
        let Some(source) = errors.handle(field.source(def.naming).map_err(|e| e.with_span(&field.ty))) else {
            continue;
        };
        let ident = &field.ident;
        let ty = &field.ty;
        let value = match source {
            Source::Column(column) => quote!(__row.get_as::<#ty>(#column)?),
            Source::Optional(column) => quote! {
                match __row.get(#column) {
                    ::core::option::Option::Some(_) => __row.get_as::<#ty>(#column)?,
                    ::core::option::Option::None => ::core::default::Default::default()
                }
            },
            Source::Nested(prefix) => quote!(<#ty as ::sqlgen::FromRow>::from_row(__row.nested(#prefix))?),
            Source::Skipped => quote!(::core::default::Default::default())
        };
        inits.push(quote!(#ident: #value));
    }
    errors.finish()?;

    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::sqlgen::FromRow for #ident #ty_generics #where_clause {
            fn from_row(__row: ::sqlgen::Row) -> ::core::result::Result<Self, ::sqlgen::SqlError> {
                ::core::result::Result::Ok(Self {
                    #(#inits),*
                })
            }
        }
    })
}
