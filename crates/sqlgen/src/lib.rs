// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # sqlgen
//!
//! One crate, all features. Re-exports:
//! - [`sql_generator`] attribute and [`FromRow`](macro@FromRow) derive from
//!   `sqlgen-impl`
//! - All runtime types from `sqlgen-core` ([`Statement`], [`Row`],
//!   [`SqlExecutor`], [`SqlError`], ...)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sqlgen::{FromRow, SqlError, SqlExecutor, sql_generator};
//!
//! #[derive(FromRow)]
//! pub struct User {
//!     pub id:    i64,
//!     pub email: String
//! }
//!
//! pub struct Users<E> {
//!     executor: E
//! }
//!
//! #[sql_generator(entity = User, table = "users", fields(id, email))]
//! impl<E: SqlExecutor> Users<E> {
//!     pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, SqlError> {}
//! }
//! ```

pub use sqlgen_core::*;
pub use sqlgen_impl::{FromRow, sql_generator};
