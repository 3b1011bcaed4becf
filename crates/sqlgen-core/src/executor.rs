// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The database seam generated code calls into.
//!
//! Implement [`SqlExecutor`] once for your driver or pool; every generated
//! method reaches it through a field of `Self`.
//!
//! | Method | Used for |
//! |--------|----------|
//! | [`fetch_all`](SqlExecutor::fetch_all) | list results |
//! | [`fetch_optional`](SqlExecutor::fetch_optional) | `Option<T>` results |
//! | [`fetch_one`](SqlExecutor::fetch_one) | single-row results |
//! | [`fetch_scalar`](SqlExecutor::fetch_scalar) | counts, booleans, other scalars |
//! | [`execute`](SqlExecutor::execute) | INSERT/UPDATE/DELETE |

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Row, SqlError, SqlValue, Statement};

/// Executes statements against a database.
///
/// Only [`fetch_all`](Self::fetch_all) and [`execute`](Self::execute) are
/// required; single-row helpers are derived from `fetch_all`. With the
/// `postgres` feature `sqlx::PgPool` implements it.
///
/// # Example
///
/// ```rust,ignore
/// struct Pool(my_driver::Pool);
///
/// #[async_trait]
/// impl SqlExecutor for Pool {
///     async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError> {
///         // bind statement.params, run, convert rows
///     }
///
///     async fn execute(&self, statement: &Statement) -> Result<u64, SqlError> {
///         // bind statement.params, run, return rows_affected
///     }
/// }
/// ```
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a query and return every row.
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError>;

    /// Run a statement and return the affected row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, SqlError>;

    /// Zero or one row.
    ///
    /// # Errors
    ///
    /// [`SqlError::TooManyRows`] when more than one row comes back.
    async fn fetch_optional(&self, statement: &Statement) -> Result<Option<Row>, SqlError> {
        let mut rows = self.fetch_all(statement).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(SqlError::TooManyRows(n))
        }
    }

    /// Exactly one row.
    ///
    /// # Errors
    ///
    /// [`SqlError::NoRows`] or [`SqlError::TooManyRows`].
    async fn fetch_one(&self, statement: &Statement) -> Result<Row, SqlError> {
        self.fetch_optional(statement)
            .await?
            .ok_or(SqlError::NoRows)
    }

    /// First column of exactly one row.
    async fn fetch_scalar(&self, statement: &Statement) -> Result<SqlValue, SqlError> {
        self.fetch_one(statement).await?.into_first()
    }
}

#[async_trait]
impl<T: SqlExecutor + ?Sized> SqlExecutor for &T {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError> {
        (**self).fetch_all(statement).await
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, SqlError> {
        (**self).execute(statement).await
    }
}

#[async_trait]
impl<T: SqlExecutor + ?Sized> SqlExecutor for Arc<T> {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError> {
        (**self).fetch_all(statement).await
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, SqlError> {
        (**self).execute(statement).await
    }
}

#[async_trait]
impl<T: SqlExecutor + ?Sized> SqlExecutor for Box<T> {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>, SqlError> {
        (**self).fetch_all(statement).await
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, SqlError> {
        (**self).execute(statement).await
    }
}
