// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Helpers, placeholders and advisory issues still compile.

use sqlgen::{FromRow, SqlError, SqlExecutor, sql_generator};

#[derive(Debug, FromRow)]
pub struct User {
    pub id:   i64,
    pub name: String
}

#[derive(Debug)]
pub enum RepoError {
    Sql(SqlError)
}

impl From<SqlError> for RepoError {
    fn from(err: SqlError) -> Self {
        Self::Sql(err)
    }
}

pub struct UserRepository<E> {
    executor: E
}

#[sql_generator(entity = User, fields(id, name))]
impl<E: SqlExecutor> UserRepository<E> {
    /// Hand-written helper, kept as is.
    pub fn table(&self) -> &'static str {
        "user"
    }

    /// Hand-written query, kept as is.
    pub async fn first_named(&self, name: &str) -> Result<Option<User>, SqlError> {
        Ok(self.find_by_name(name).await?.into_iter().next())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<User>, SqlError> {}

    // any error type with `From<SqlError>` works
    pub async fn count_by_name(&self, name: &str) -> Result<i64, RepoError> {}

    // unknown field: generated with a warning
    pub async fn find_by_nickname(&self, nickname: &str) -> Result<Vec<User>, SqlError> {}

    // no convention: logging placeholder
    pub async fn fetch_everything(&self) -> Result<Vec<User>, SqlError> {}
}

fn main() {}
