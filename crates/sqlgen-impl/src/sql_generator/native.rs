// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[native_query(...)]` method attribute.
//!
//! | Attribute | Default | Description |
//! |-----------|---------|-------------|
//! | `sql` | required | SQL text with `?` or `:name` placeholders |
//! | `result_type` | none | Row type decoded first, then converted with `Into` |
//! | `mapping` | `"auto"` | `auto`, `manual`, `bean_property`, `constructor`, `nested` |
//! | `column_mapping` | none | `"column=property"` renames applied before decoding |
//! | `is_update` | `false` | Execute as a mutation whatever the SQL starts with |
//! | `parameter_type` | detected | `positional` or `named` |
//! | `validate_sql` | `true` | Check parameters against placeholders |

use darling::FromMeta;
use sqlgen_engine::NativeQuery;
use syn::{Attribute, Path};

use crate::utils::{
    meta::{ColumnMapping, Mapping, Style},
    types::path_ref
};

fn default_validate_sql() -> bool {
    true
}

/// Parsed `#[native_query(...)]`.
#[derive(Debug, FromMeta)]
pub struct NativeQueryAttrs {
    pub sql: String,

    #[darling(default)]
    pub result_type: Option<Path>,

    #[darling(default)]
    pub mapping: Mapping,

    #[darling(default)]
    pub column_mapping: ColumnMapping,

    #[darling(default)]
    pub is_update: bool,

    #[darling(default)]
    pub parameter_type: Option<Style>,

    #[darling(default = "default_validate_sql")]
    pub validate_sql: bool
}

impl NativeQueryAttrs {
    /// Engine view of the attribute.
    pub fn to_query(&self) -> NativeQuery {
        NativeQuery {
            sql:            self.sql.clone(),
            result_type:    self.result_type.as_ref().map(path_ref),
            mapping:        self.mapping.0,
            column_mapping: self.column_mapping.0.clone(),
            is_update:      self.is_update,
            parameter_type: self.parameter_type.map(|style| style.0),
            validate_sql:   self.validate_sql
        }
    }
}

/// Remove `#[native_query]` from `attrs` and parse it.
///
/// # Errors
///
/// Malformed attribute arguments, or the attribute given twice.
pub fn take(attrs: &mut Vec<Attribute>) -> darling::Result<Option<NativeQueryAttrs>> {
    let (found, rest): (Vec<Attribute>, Vec<Attribute>) = attrs
        .drain(..)
        .partition(|attr| attr.path().is_ident("native_query"));
    *attrs = rest;

    match found.as_slice() {
        [] => Ok(None),
        [attr] => NativeQueryAttrs::from_meta(&attr.meta)
            .map(Some)
            .map_err(|err| err.with_span(attr)),
        [_, second, ..] => {
            Err(darling::Error::custom("`#[native_query]` may appear only once").with_span(second))
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlgen_engine::{MappingStrategy, ParameterStyle, ScalarKind, TypeRef};
    use syn::parse_quote;

    use super::*;

    #[test]
    fn minimal_query() {
        let mut attrs: Vec<Attribute> = vec![
            parse_quote!(#[native_query(sql = "SELECT * FROM users")]),
            parse_quote!(#[doc = "all users"])
        ];
        let query = take(&mut attrs).unwrap().unwrap().to_query();
        assert_eq!(query.sql, "SELECT * FROM users");
        assert_eq!(query.mapping, MappingStrategy::Auto);
        assert!(query.validate_sql);
        assert!(query.parameter_type.is_none());
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn every_option() {
        let mut attrs: Vec<Attribute> = vec![parse_quote!(
            #[native_query(
                sql = "UPDATE users SET active = :active",
                result_type = UserRow,
                mapping = "bean_property",
                column_mapping("user_name=name"),
                is_update,
                parameter_type = "named",
                validate_sql = false
            )]
        )];
        let query = take(&mut attrs).unwrap().unwrap().to_query();
        assert_eq!(query.result_type, Some(TypeRef::named("UserRow")));
        assert_eq!(query.mapping, MappingStrategy::BeanProperty);
        assert_eq!(query.column_mapping, vec![("user_name".into(), "name".into())]);
        assert!(query.is_update);
        assert_eq!(query.parameter_type, Some(ParameterStyle::Named));
        assert!(!query.validate_sql);
        assert!(attrs.is_empty());
    }

    #[test]
    fn scalar_result_type() {
        let mut attrs: Vec<Attribute> = vec![parse_quote!(
            #[native_query(sql = "SELECT 1", result_type = i64)]
        )];
        let query = take(&mut attrs).unwrap().unwrap().to_query();
        assert_eq!(
            query.result_type,
            Some(TypeRef::Scalar(ScalarKind::Long, "i64".into()))
        );
    }

    #[test]
    fn absent_attribute() {
        let mut attrs: Vec<Attribute> = vec![parse_quote!(#[inline])];
        assert!(take(&mut attrs).unwrap().is_none());
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn missing_sql_is_an_error() {
        let mut attrs: Vec<Attribute> = vec![parse_quote!(#[native_query(is_update)])];
        assert!(take(&mut attrs).is_err());
    }

    #[test]
    fn duplicate_attribute_is_an_error() {
        let mut attrs: Vec<Attribute> = vec![
            parse_quote!(#[native_query(sql = "SELECT 1")]),
            parse_quote!(#[native_query(sql = "SELECT 2")])
        ];
        assert!(take(&mut attrs).is_err());
    }
}
