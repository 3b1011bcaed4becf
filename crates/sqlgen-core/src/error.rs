// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime error type shared by executors and generated code.
//!
//! Generated methods return the user's error type; every fallible runtime
//! call is followed by `?`, so that type must implement `From<SqlError>`.

use std::error::Error as StdError;

/// Failure while executing a statement or decoding its result.
#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    /// Error reported by the database driver.
    #[error("database error: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    /// A single row was required but none was returned.
    #[error("query returned no rows")]
    NoRows,

    /// At most one row was expected.
    #[error("query returned {0} rows where at most one was expected")]
    TooManyRows(usize),

    /// A column required for decoding is absent.
    #[error("column `{0}` not found in row")]
    MissingColumn(String),

    /// A value could not be converted.
    #[error("cannot decode {found} value as {expected}")]
    Decode {
        /// Target type.
        expected: &'static str,
        /// Source value kind.
        found:    &'static str
    },

    /// A named placeholder had no bound value.
    #[error("named parameter `:{0}` has no bound value")]
    UnboundParameter(String)
}

impl SqlError {
    /// Wrap a driver error.
    pub fn backend(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

impl PartialEq for SqlError {
    /// Driver errors compare by message.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Backend(a), Self::Backend(b)) => a.to_string() == b.to_string(),
            (Self::NoRows, Self::NoRows) => true,
            (Self::TooManyRows(a), Self::TooManyRows(b)) => a == b,
            (Self::MissingColumn(a), Self::MissingColumn(b))
            | (Self::UnboundParameter(a), Self::UnboundParameter(b)) => a == b,
            (
                Self::Decode {
                    expected: e1,
                    found: f1
                },
                Self::Decode {
                    expected: e2,
                    found: f2
                }
            ) => e1 == e2 && f1 == f2,
            _ => false
        }
    }
}
