// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Native SQL with positional and named parameters, row types and remapping.

use sqlgen::{FromRow, SqlError, SqlExecutor, sql_generator};

#[derive(Debug, FromRow)]
pub struct User {
    pub id:    i64,
    pub name:  String,
    pub email: String
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id:    i64,
    pub name:  String,
    pub email: String
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id:    row.id,
            name:  row.name,
            email: row.email
        }
    }
}

pub struct Reports<E> {
    pool: E
}

#[sql_generator(executor = pool)]
impl<E: SqlExecutor> Reports<E> {
    #[native_query(sql = "SELECT * FROM users WHERE email LIKE ?")]
    pub async fn search(&self, pattern: &str) -> Result<Vec<User>, SqlError> {}

    #[native_query(sql = "SELECT * FROM users WHERE name = :name AND email = :mail")]
    pub async fn lookup(&self, name: &str, #[param("mail")] email: &str) -> Result<Option<User>, SqlError> {}

    #[native_query(
        sql = "SELECT id, user_name, mail FROM users",
        result_type = UserRow,
        mapping = "bean_property",
        column_mapping("user_name=name", "mail=email")
    )]
    pub async fn all(&self) -> Result<Vec<User>, SqlError> {}

    #[native_query(sql = "SELECT email FROM users")]
    pub async fn emails(&self) -> Result<Vec<String>, SqlError> {}

    #[native_query(sql = "SELECT COUNT(*) FROM users")]
    pub async fn total(&self) -> Result<i64, SqlError> {}

    #[native_query(sql = "UPDATE users SET name = ? WHERE id = ?")]
    pub async fn rename(&self, name: &str, id: i64) -> Result<u64, SqlError> {}

    #[native_query(sql = "CALL refresh_stats()", is_update)]
    pub async fn refresh(&self) -> Result<(), SqlError> {}
}

fn main() {}
