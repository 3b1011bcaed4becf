// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Block-Level `#[sql_generator(...)]`
//!
//! ```rust,ignore
//! #[sql_generator(
//!     entity = User,                  // Optional: entity type, table defaults to `user`
//!     table = "users",                // Optional: explicit table name
//!     fields(id, name, email),        // Required with entity/table: entity fields in order
//!     primary_key = id,               // Optional: defaults to `id`
//!     naming = "snake_case",          // Optional: snake_case | camel_case | pascal_case | kebab_case
//!     executor = pool,                // Optional: executor field on `self` (default: `executor`)
//!     native_only,                    // Optional: only #[native_query] methods are generated
//!     strict                          // Optional: issues are compile errors
//! )]
//! impl UserRepository { /* ... */ }
//! ```
//!
//! ## Method-Level `#[native_query(...)]`
//!
//! ```rust,ignore
//! #[native_query(
//!     sql = "SELECT * FROM users WHERE email = :email", // Required
//!     result_type = UserRow,          // Optional: row type converted with `Into`
//!     mapping = "bean_property",      // Optional: auto | manual | bean_property | constructor | nested
//!     column_mapping("mail=email"),   // Optional: column renames before decoding
//!     parameter_type = "named",       // Optional: positional | named (default: from the SQL)
//!     is_update,                      // Optional: force execution as a mutation
//!     validate_sql = false            // Optional: skip placeholder/parameter checks
//! )]
//! async fn by_email(&self, #[param("email")] mail: &str) -> Result<Option<User>, SqlError> {}
//! ```

mod from_row;
mod sql_generator;
mod utils;

use proc_macro::TokenStream;

/// Attribute macro generating data-access method bodies.
///
/// # Overview
///
/// Applied to an inherent `impl` block. Every `async fn` with an empty body
/// is planned from its name (`find_by_email_and_active`, `count_by_status`,
/// `exists_by_email`, `delete_by_id`, `save`, `update`, ...) or from its
/// `#[native_query]` SQL, and given a body that builds a
/// `sqlgen::Statement` and runs it on `self.executor`.
///
/// Methods with a body are left untouched, so hand-written helpers live
/// alongside generated ones.
///
/// # Example
///
/// ```rust,ignore
/// use sqlgen::{SqlError, sql_generator};
///
/// pub struct UserRepository<E> {
///     executor: E
/// }
///
/// #[sql_generator(entity = User, table = "users", fields(id, name, email, active))]
/// impl<E: sqlgen::SqlExecutor> UserRepository<E> {
///     pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, SqlError> {}
///
///     pub async fn count_by_active(&self, active: bool) -> Result<i64, SqlError> {}
///
///     #[native_query(sql = "SELECT * FROM users WHERE name LIKE :pattern")]
///     pub async fn search(&self, pattern: &str) -> Result<Vec<User>, SqlError> {}
/// }
/// ```
///
/// # Diagnostics
///
/// | Situation | Default | `strict` |
/// |-----------|---------|----------|
/// | Unknown field, parameter mismatch | Warning, body generated | Compile error |
/// | Name matches no convention | Warning, logging placeholder | Compile error |
/// | Not `async`, bad return type | Warning, body kept | Compile error |
/// | Malformed attribute arguments | Compile error | Compile error |
///
/// Warnings are reported through `#[deprecated]` markers, so they read
/// `use of deprecated struct ... [sqlgen::<code>]`.
#[proc_macro_attribute]
pub fn sql_generator(args: TokenStream, input: TokenStream) -> TokenStream {
    sql_generator::expand(args, input)
}

/// Derive macro implementing `sqlgen::FromRow` for a named struct.
///
/// # Example
///
/// ```rust,ignore
/// use sqlgen::FromRow;
///
/// #[derive(FromRow)]
/// #[from_row(naming = "snake_case")]
/// pub struct User {
///     pub id:         i64,
///     pub user_token: String,             // column `user_token`
///     #[from_row(rename = "mail")]
///     pub email:      String,             // column `mail`
///     #[from_row(nested = "addr")]
///     pub address:    Address,            // columns `addr.*`
///     #[from_row(default)]
///     pub nickname:   Option<String>,     // Default when the column is absent
///     #[from_row(skip)]
///     pub cached:     Vec<u8>             // always Default
/// }
/// ```
#[proc_macro_derive(FromRow, attributes(from_row))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    from_row::derive(input)
}
