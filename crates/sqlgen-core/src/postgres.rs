// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL backend over `sqlx`.
//!
//! [`SqlExecutor`] is implemented for [`PgPool`], so a pool can sit directly
//! in the executor field of a generated repository. Statements are rewritten
//! to `$n` markers, values are bound through sqlx's `Encode` impls and rows
//! come back through [`sqlx::FromRow`].
//!
//! # Binding
//!
//! | `SqlValue` | PostgreSQL type |
//! |------------|-----------------|
//! | `Null` | `TEXT` null |
//! | `Bool` | `BOOL` |
//! | `Int` | `INT8` |
//! | `Float` | `FLOAT8` |
//! | `Text` | `TEXT` |
//! | `Decimal` | `NUMERIC` with the `decimal` feature, `TEXT` otherwise |
//! | `List` | array of the element type |
//!
//! PostgreSQL has no list parameter for `IN (...)`; write `= ANY(:ids)` in
//! native SQL instead.
//!
//! # Decoding
//!
//! `BOOL`, `INT2`/`INT4`/`INT8`, `FLOAT4`/`FLOAT8`, `TEXT`, `VARCHAR`,
//! `BPCHAR`, `NAME` and (with `decimal`) `NUMERIC` columns decode to the
//! matching [`SqlValue`]. Any other column type is a decode error.

use async_trait::async_trait;
use sqlx::{
    Arguments, Column as _, Row as _, TypeInfo as _, ValueRef as _,
    error::BoxDynError,
    postgres::{PgArguments, PgColumn, PgPool, PgRow}
};

use crate::{Params, Row, SqlError, SqlExecutor, SqlValue, Statement};

#[async_trait]
impl SqlExecutor for PgPool {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError> {
        let (sql, arguments) = prepare(statement)?;
        let rows = sqlx::query_with(&sql, arguments)
            .try_map(|row: PgRow| <Row as sqlx::FromRow<'_, PgRow>>::from_row(&row))
            .fetch_all(self)
            .await?;
        Ok(rows)
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, SqlError> {
        let (sql, arguments) = prepare(statement)?;
        let done = sqlx::query_with(&sql, arguments).execute(self).await?;
        Ok(done.rows_affected())
    }
}

impl From<sqlx::Error> for SqlError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NoRows,
            sqlx::Error::ColumnNotFound(column) => Self::MissingColumn(column),
            other => Self::backend(other)
        }
    }
}

impl<'r> sqlx::FromRow<'r, PgRow> for Row {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        row.columns()
            .iter()
            .map(|column| -> Result<_, sqlx::Error> { Ok((column.name(), decode(row, column)?)) })
            .collect()
    }
}

/// SQL with `$n` markers plus bound arguments.
fn prepare(statement: &Statement) -> Result<(String, PgArguments), SqlError> {
    let positional = statement.to_positional()?;
    // to_positional never leaves named parameters behind
    let values: &[SqlValue] = match &positional.params {
        Params::Positional(values) => values,
        Params::Named(_) => &[]
    };

    let sql = numbered(&positional.sql);
    tracing::trace!(sql = %sql, params = values.len(), "binding postgres statement");
    Ok((sql, arguments(values)?))
}

/// `?` → `$1`, `$2`, ... in order of appearance.
fn numbered(sql: &str) -> String {
    let mut parts = sql.split('?');
    let mut out = parts.next().unwrap_or_default().to_string();
    for (index, part) in parts.enumerate() {
        out.push_str(&format!("${}{part}", index + 1));
    }
    out
}

fn arguments(values: &[SqlValue]) -> Result<PgArguments, SqlError> {
    let mut arguments = PgArguments::default();
    for value in values {
        bind(&mut arguments, value).map_err(SqlError::backend)?;
    }
    Ok(arguments)
}

fn bind(arguments: &mut PgArguments, value: &SqlValue) -> Result<(), BoxDynError> {
    match value {
        SqlValue::Null => arguments.add(Option::<String>::None),
        SqlValue::Bool(v) => arguments.add(*v),
        SqlValue::Int(v) => arguments.add(*v),
        SqlValue::Float(v) => arguments.add(*v),
        SqlValue::Text(v) => arguments.add(v.clone()),
        SqlValue::Decimal(v) => bind_decimal(arguments, v),
        SqlValue::List(items) => bind_array(arguments, items)
    }
}

#[cfg(feature = "decimal")]
fn bind_decimal(arguments: &mut PgArguments, text: &str) -> Result<(), BoxDynError> {
    arguments.add(text.parse::<rust_decimal::Decimal>()?)
}

#[cfg(not(feature = "decimal"))]
fn bind_decimal(arguments: &mut PgArguments, text: &str) -> Result<(), BoxDynError> {
    arguments.add(text.to_string())
}

/// Lists bind as one array; the first element picks the element type.
fn bind_array(arguments: &mut PgArguments, items: &[SqlValue]) -> Result<(), BoxDynError> {
    match items.first() {
        None | Some(SqlValue::Text(_)) => arguments.add(elements(items, |item| match item {
            SqlValue::Text(v) => Some(v.clone()),
            _ => None
        })?),
        Some(SqlValue::Int(_)) => arguments.add(elements(items, |item| match item {
            SqlValue::Int(v) => Some(*v),
            _ => None
        })?),
        Some(SqlValue::Float(_)) => arguments.add(elements(items, |item| match item {
            SqlValue::Float(v) => Some(*v),
            _ => None
        })?),
        Some(SqlValue::Bool(_)) => arguments.add(elements(items, |item| match item {
            SqlValue::Bool(v) => Some(*v),
            _ => None
        })?),
        Some(other) => Err(format!("cannot bind a list of {} values", other.type_name()).into())
    }
}

fn elements<T>(items: &[SqlValue], pick: impl Fn(&SqlValue) -> Option<T>) -> Result<Vec<T>, BoxDynError> {
    items
        .iter()
        .map(|item| pick(item).ok_or_else(|| BoxDynError::from("list elements must share one type")))
        .collect()
}

fn decode(row: &PgRow, column: &PgColumn) -> Result<SqlValue, sqlx::Error> {
    let index = column.ordinal();
    if row.try_get_raw(index)?.is_null() {
        return Ok(SqlValue::Null);
    }

    Ok(match column.type_info().name() {
        "BOOL" => SqlValue::Bool(row.try_get(index)?),
        "INT2" => SqlValue::Int(row.try_get::<i16, _>(index)?.into()),
        "INT4" => SqlValue::Int(row.try_get::<i32, _>(index)?.into()),
        "INT8" => SqlValue::Int(row.try_get(index)?),
        "FLOAT4" => SqlValue::Float(row.try_get::<f32, _>(index)?.into()),
        "FLOAT8" => SqlValue::Float(row.try_get(index)?),
        #[cfg(feature = "decimal")]
        "NUMERIC" => SqlValue::Decimal(row.try_get::<rust_decimal::Decimal, _>(index)?.to_string()),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => SqlValue::Text(row.try_get(index)?),
        other => {
            return Err(sqlx::Error::ColumnDecode {
                index:  column.name().to_string(),
                source: format!("unsupported column type `{other}`").into()
            });
        }
    })
}
