// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result rows and row decoding.

use std::collections::{BTreeMap, HashMap};

use crate::{FromSqlValue, SqlError, SqlValue};

/// One result row: ordered column names and values.
///
/// Column lookup is exact first, then ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values:  Vec<SqlValue>
}

impl Row {
    /// Empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, value.into());
        self
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(column)))
    }

    /// Value of `column`.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.position(column).map(|i| &self.values[i])
    }

    /// Decode `column` as `T`.
    ///
    /// # Errors
    ///
    /// [`SqlError::MissingColumn`] or the decode error.
    pub fn get_as<T: FromSqlValue>(&self, column: &str) -> Result<T, SqlError> {
        let value = self
            .get(column)
            .ok_or_else(|| SqlError::MissingColumn(column.to_string()))?;
        T::from_sql_value(value.clone())
    }

    /// Remove and decode `column` as `T`.
    ///
    /// # Errors
    ///
    /// [`SqlError::MissingColumn`] or the decode error.
    pub fn take<T: FromSqlValue>(&mut self, column: &str) -> Result<T, SqlError> {
        let i = self
            .position(column)
            .ok_or_else(|| SqlError::MissingColumn(column.to_string()))?;
        self.columns.remove(i);
        T::from_sql_value(self.values.remove(i))
    }

    /// First column's value.
    ///
    /// # Errors
    ///
    /// [`SqlError::MissingColumn`] for an empty row.
    pub fn into_first(self) -> Result<SqlValue, SqlError> {
        self.values
            .into_iter()
            .next()
            .ok_or_else(|| SqlError::MissingColumn("<first>".into()))
    }

    /// Rename columns by `(column, property)` pairs; unmapped columns keep
    /// their names.
    #[must_use]
    pub fn remap(mut self, mapping: &[(&str, &str)]) -> Self {
        for (column, property) in mapping {
            if let Some(i) = self.position(column) {
                self.columns[i] = (*property).to_string();
            }
        }
        self
    }

    /// Columns named `prefix.rest`, renamed to `rest`.
    pub fn nested(&self, prefix: &str) -> Self {
        let mut out = Self::new();
        for (column, value) in self.columns.iter().zip(&self.values) {
            if let Some(rest) = column
                .strip_prefix(prefix)
                .and_then(|r| r.strip_prefix('.'))
            {
                out.push(rest, value.clone());
            }
        }
        out
    }
}

impl<C: Into<String>> FromIterator<(C, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, SqlValue)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

impl IntoIterator for Row {
    type Item = (String, SqlValue);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<String>, std::vec::IntoIter<SqlValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter().zip(self.values)
    }
}

macro_rules! into_value {
    ($($ty:ty => $variant:ident),*) => {$(
        impl From<$ty> for SqlValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v.into())
            }
        }
    )*};
}

into_value!(bool => Bool, i32 => Int, i64 => Int, f64 => Float, String => Text, &str => Text);

/// Decode a whole row.
///
/// Implement this for entity and DTO types returned from generated methods.
///
/// # Example
///
/// ```rust
/// use sqlgen_core::{FromRow, Row, SqlError};
///
/// struct User {
///     id:   i64,
///     name: String
/// }
///
/// impl FromRow for User {
///     fn from_row(row: Row) -> Result<Self, SqlError> {
///         Ok(Self {
///             id:   row.get_as("id")?,
///             name: row.get_as("name")?
///         })
///     }
/// }
///
/// let user = User::from_row(Row::new().with("id", 1_i64).with("name", "ann")).unwrap();
/// assert_eq!(user.name, "ann");
/// ```
pub trait FromRow: Sized {
    /// Decode `row`.
    ///
    /// # Errors
    ///
    /// Missing columns or undecodable values.
    fn from_row(row: Row) -> Result<Self, SqlError>;
}

impl FromRow for Row {
    fn from_row(row: Row) -> Result<Self, SqlError> {
        Ok(row)
    }
}

impl<T: FromSqlValue> FromRow for HashMap<String, T> {
    fn from_row(row: Row) -> Result<Self, SqlError> {
        row.into_iter()
            .map(|(c, v)| T::from_sql_value(v).map(|v| (c, v)))
            .collect()
    }
}

impl<T: FromSqlValue> FromRow for BTreeMap<String, T> {
    fn from_row(row: Row) -> Result<Self, SqlError> {
        row.into_iter()
            .map(|(c, v)| T::from_sql_value(v).map(|v| (c, v)))
            .collect()
    }
}
