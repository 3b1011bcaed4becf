// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity schema: table name, ordered field list and primary key.
//!
//! Field names are camel-cased identifiers as they appear in method names
//! (`createdAt`), never column names. Column names come from an explicit
//! [`with_column`](EntitySchema::with_column) entry when one exists and from
//! [`NamingStrategy::map_column`] otherwise.

use std::collections::BTreeMap;

use crate::naming::NamingStrategy;

/// Resolved description of the entity a generator works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    table_name:  String,
    fields:      Vec<String>,
    primary_key: Option<String>,
    columns:     BTreeMap<String, String>
}

impl EntitySchema {
    /// Build a schema from a table name and fields in declaration order.
    ///
    /// A field literally named `id` becomes the primary key; use
    /// [`with_primary_key`](Self::with_primary_key) to pick another.
    pub fn new<I, S>(table_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let primary_key = fields.iter().find(|f| f.as_str() == "id").cloned();
        Self {
            table_name: table_name.into(),
            fields,
            primary_key,
            columns: BTreeMap::new()
        }
    }

    /// Override the inferred primary key.
    #[must_use]
    pub fn with_primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Drop the primary key so UPDATE statements carry no WHERE clause.
    #[must_use]
    pub fn without_primary_key(mut self) -> Self {
        self.primary_key = None;
        self
    }

    /// Pin the column of `field` instead of deriving it from the naming
    /// strategy.
    ///
    /// `map_column` only splits at lower→upper transitions, so a field such
    /// as `address1Line` needs its column spelled out.
    #[must_use]
    pub fn with_column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Column for `field`: the pinned one, or `naming.map_column(field)`.
    ///
    /// ```rust
    /// use sqlgen_engine::{EntitySchema, NamingStrategy};
    ///
    /// let schema = EntitySchema::new("t", ["lineNo", "address1Line"])
    ///     .with_column("address1Line", "address1_line");
    /// assert_eq!(schema.column("lineNo", NamingStrategy::SnakeCase), "line_no");
    /// assert_eq!(schema.column("address1Line", NamingStrategy::SnakeCase), "address1_line");
    /// ```
    pub fn column(&self, field: &str, naming: NamingStrategy) -> String {
        match self.columns.get(field) {
            Some(column) => column.clone(),
            None => naming.map_column(field)
        }
    }

    /// Table name used in every generated statement.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Primary key field, if any.
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Whether `field` is declared on the entity.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Fields other than the primary key, in declaration order.
    pub fn non_key_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(String::as_str)
            .filter(move |f| Some(*f) != self.primary_key())
    }

    /// `true` when no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
