// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use sqlgen_core::prelude::*;
//! ```

pub use crate::{
    FromRow, FromSqlValue, Params, Row, SqlError, SqlExecutor, SqlValue, Statement, ToSqlValue,
    async_trait
};
