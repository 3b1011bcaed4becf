// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL text plus bound parameters, as handed to a [`SqlExecutor`](crate::SqlExecutor).

use std::borrow::Cow;

use sqlgen_engine::raw::named_markers;

use crate::{SqlError, SqlValue};

/// Bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Values for `?` markers, in order.
    Positional(Vec<SqlValue>),
    /// Values for `:name` markers.
    Named(Vec<(String, SqlValue)>)
}

impl Params {
    /// Number of bound values.
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(v) => v.len(),
            Self::Named(v) => v.len()
        }
    }

    /// `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text.
    pub sql:    Cow<'static, str>,
    /// Bound values.
    pub params: Params
}

impl Statement {
    /// Statement with `?` markers.
    pub fn positional(sql: impl Into<Cow<'static, str>>, values: Vec<SqlValue>) -> Self {
        Self {
            sql:    sql.into(),
            params: Params::Positional(values)
        }
    }

    /// Statement with `:name` markers.
    pub fn named(sql: impl Into<Cow<'static, str>>, values: Vec<(String, SqlValue)>) -> Self {
        Self {
            sql:    sql.into(),
            params: Params::Named(values)
        }
    }

    /// Value bound to `name`, for named statements.
    pub fn named_value(&self, name: &str) -> Option<&SqlValue> {
        match &self.params {
            Params::Named(values) => values.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            Params::Positional(_) => None
        }
    }

    /// Rewrite `:name` markers to `?` with values in marker order.
    ///
    /// For executors whose driver only understands positional markers. A
    /// name used twice is bound twice. `::` casts are left alone. Markers are
    /// found with the same scanner the generator validates against.
    ///
    /// # Errors
    ///
    /// [`SqlError::UnboundParameter`] for a marker without a value.
    ///
    /// ```rust
    /// use sqlgen_core::{Params, SqlValue, Statement};
    ///
    /// let stmt = Statement::named(
    ///     "SELECT * FROM t WHERE a = :a OR b = :a::int",
    ///     vec![("a".into(), SqlValue::Int(1))]
    /// );
    /// let positional = stmt.to_positional().unwrap();
    /// assert_eq!(positional.sql, "SELECT * FROM t WHERE a = ? OR b = ?::int");
    /// assert_eq!(positional.params, Params::Positional(vec![SqlValue::Int(1), SqlValue::Int(1)]));
    /// ```
    pub fn to_positional(&self) -> Result<Self, SqlError> {
        if let Params::Positional(_) = self.params {
            return Ok(self.clone());
        }

        let mut sql = String::with_capacity(self.sql.len());
        let mut values = Vec::new();
        let mut copied = 0;
        for marker in named_markers(&self.sql) {
            let value = self
                .named_value(marker.name)
                .ok_or_else(|| SqlError::UnboundParameter(marker.name.to_string()))?;
            values.push(value.clone());
            sql.push_str(&self.sql[copied..marker.range.start]);
            sql.push('?');
            copied = marker.range.end;
        }
        sql.push_str(&self.sql[copied..]);

        Ok(Self::positional(sql, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let stmt = Statement::positional("SELECT 1", vec![]);
        assert!(stmt.params.is_empty());

        let stmt = Statement::named("SELECT :a", vec![("a".into(), SqlValue::Int(1))]);
        assert_eq!(stmt.params.len(), 1);
        assert_eq!(stmt.named_value("a"), Some(&SqlValue::Int(1)));
        assert_eq!(stmt.named_value("b"), None);
    }

    #[test]
    fn named_to_positional_keeps_marker_order() {
        let stmt = Statement::named(
            "UPDATE t SET name = :name WHERE id = :id",
            vec![
                ("id".into(), SqlValue::Int(9)),
                ("name".into(), SqlValue::Text("x".into()))
            ]
        );
        let converted = stmt.to_positional().unwrap();
        assert_eq!(converted.sql, "UPDATE t SET name = ? WHERE id = ?");
        assert_eq!(
            converted.params,
            Params::Positional(vec![SqlValue::Text("x".into()), SqlValue::Int(9)])
        );
    }

    #[test]
    fn adjacent_markers_and_casts() {
        let stmt = Statement::named(
            "SELECT :a:b, x::text, :b::int",
            vec![
                ("a".into(), SqlValue::Int(1)),
                ("b".into(), SqlValue::Int(2))
            ]
        );
        let converted = stmt.to_positional().unwrap();
        assert_eq!(converted.sql, "SELECT ??, x::text, ?::int");
        assert_eq!(
            converted.params,
            Params::Positional(vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(2)])
        );
    }

    #[test]
    fn unbound_marker_is_an_error() {
        let stmt = Statement::named("SELECT :missing", vec![]);
        assert_eq!(
            stmt.to_positional(),
            Err(SqlError::UnboundParameter("missing".into()))
        );
    }

    #[test]
    fn positional_is_unchanged() {
        let stmt = Statement::positional("SELECT ?", vec![SqlValue::Int(1)]);
        assert_eq!(stmt.to_positional(), Ok(stmt.clone()));
    }
}
