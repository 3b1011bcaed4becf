// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime contract for sqlgen generated code.
//!
//! Methods generated by `#[sql_generator]` build a [`Statement`], hand it to a
//! [`SqlExecutor`] and decode the returned [`Row`]s. This crate defines those
//! types; with the `postgres` feature it also runs them on a `sqlx::PgPool`.
//!
//! # Overview
//!
//! - [`SqlValue`], [`ToSqlValue`], [`FromSqlValue`] — dynamically typed
//!   values and conversions
//! - [`Row`], [`FromRow`] — result rows and row decoding
//! - [`Statement`], [`Params`] — SQL text with bound values
//! - [`SqlExecutor`] — the database seam you implement
//! - [`SqlError`] — runtime failures
//! - [`prelude`] — convenient re-exports
//!
//! # Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `postgres` | [`SqlExecutor`] for `sqlx::PgPool`, `sqlx::FromRow` for [`Row`] |
//! | `decimal` | `ToSqlValue`/`FromSqlValue` for `rust_decimal::Decimal` |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod executor;
#[cfg(feature = "postgres")]
mod postgres;
pub mod prelude;
mod row;
mod statement;
mod value;

/// Re-export async_trait for executor implementations.
pub use async_trait::async_trait;
pub use error::SqlError;
pub use executor::SqlExecutor;
pub use row::{FromRow, Row};
pub use statement::{Params, Statement};
pub use value::{FromSqlValue, SqlValue, ToSqlValue};

/// Support for generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    use crate::Statement;

    /// Logged before a generated method runs its statement.
    pub fn trace(method: &'static str, statement: &Statement) {
        tracing::debug!(
            method,
            sql = %statement.sql,
            params = statement.params.len(),
            "executing generated statement"
        );
    }

    /// Body of methods no query convention applies to.
    pub fn unsupported_method(method: &'static str) {
        tracing::warn!(method, "called a method that sqlgen could not generate");
    }
}
