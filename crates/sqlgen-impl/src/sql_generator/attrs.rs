// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[sql_generator(...)]` attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `entity` | No | none | Entity type; enables derived queries |
//! | `table` | No | from `entity` | Table name |
//! | `naming` | No | `"snake_case"` | Column naming strategy |
//! | `fields` | With `entity`/`table` | none | Entity fields in column order |
//! | `primary_key` | No | `id` when listed | Key field used by `update` |
//! | `executor` | No | `executor` | Field of `Self` implementing `SqlExecutor` |
//! | `native_only` | No | `false` | Generate only `#[native_query]` methods |
//! | `strict` | No | `false` | Report issues as compile errors |

use convert_case::{Case, Casing};
use darling::{FromMeta, util::PathList};
use sqlgen_engine::{ClassContext, EntitySchema};
use syn::{Ident, Path, ext::IdentExt};

use crate::utils::meta::Naming;

pub fn default_executor() -> Path {
    syn::parse_quote!(executor)
}

/// Parsed `#[sql_generator(...)]` arguments.
#[derive(Debug, FromMeta)]
pub struct GeneratorAttrs {
    #[darling(default)]
    pub entity: Option<Path>,

    #[darling(default)]
    pub table: Option<String>,

    #[darling(default)]
    pub naming: Naming,

    #[darling(default)]
    pub fields: PathList,

    #[darling(default)]
    pub primary_key: Option<Path>,

    #[darling(default = "default_executor")]
    pub executor: Path,

    #[darling(default)]
    pub native_only: bool,

    #[darling(default)]
    pub strict: bool
}

impl GeneratorAttrs {
    /// Engine context for this `impl` block.
    ///
    /// # Errors
    ///
    /// A table without `fields(...)`, a non-identifier field, or a primary
    /// key that is not one of the fields.
    pub fn context(&self) -> darling::Result<ClassContext> {
        let naming = self.naming.0;
        let table = match (&self.table, &self.entity) {
            (Some(table), _) => table.clone(),
            (None, Some(entity)) => naming.table_name(&last_ident(entity)?.unraw().to_string()),
            (None, None) => {
                let mut ctx = ClassContext::new(None, naming);
                ctx.native_only = true;
                ctx.strict = self.strict;
                return Ok(ctx);
            }
        };

        let fields = self.field_idents()?;
        if fields.is_empty() {
            let err = darling::Error::custom("list the entity fields with `fields(...)` to generate derived queries");
            return Err(match &self.entity {
                Some(entity) => err.with_span(entity),
                None => err
            });
        }

        let names: Vec<String> = fields.iter().map(|(name, _)| name.clone()).collect();
        let mut schema = EntitySchema::new(table, names);
        for (name, ident) in &fields {
            schema = schema.with_column(name.clone(), self.naming.column(ident));
        }
        if let Some(key) = &self.primary_key {
            let key_name = field_name(ident_of(key)?);
            if !schema.has_field(&key_name) {
                return Err(
                    darling::Error::custom("primary key must be one of `fields(...)`").with_span(key)
                );
            }
            schema = schema.with_primary_key(key_name);
        }

        let mut ctx = ClassContext::new(Some(schema), naming);
        ctx.native_only = self.native_only;
        ctx.strict = self.strict;
        Ok(ctx)
    }

    /// `(engine field name, Rust identifier)` for each listed field.
    ///
    /// # Errors
    ///
    /// An entry that is not a plain identifier.
    pub fn field_idents(&self) -> darling::Result<Vec<(String, Ident)>> {
        self.fields
            .iter()
            .map(|path| {
                let ident = ident_of(path)?;
                Ok((field_name(ident), ident.clone()))
            })
            .collect()
    }

    /// Field of `Self` generated bodies execute through.
    ///
    /// # Errors
    ///
    /// `executor` is not a plain identifier.
    pub fn executor_ident(&self) -> darling::Result<Ident> {
        ident_of(&self.executor).cloned()
    }
}

/// Engine spelling of a Rust field identifier: `user_token` → `userToken`.
pub fn field_name(ident: &Ident) -> String {
    ident.unraw().to_string().to_case(Case::Camel)
}

fn ident_of(path: &Path) -> darling::Result<&Ident> {
    path.get_ident()
        .ok_or_else(|| darling::Error::custom("expected an identifier").with_span(path))
}

// `entity` may be a full path; the last segment names the table
fn last_ident(path: &Path) -> darling::Result<&Ident> {
    path.segments
        .last()
        .map(|segment| &segment.ident)
        .ok_or_else(|| darling::Error::custom("expected a type path").with_span(path))
}
