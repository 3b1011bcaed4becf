// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use sqlgen::{FromRow, SqlError, SqlExecutor, sql_generator};

#[derive(FromRow)]
pub struct User {
    pub id:   i64,
    pub name: String
}

pub struct Users<E> {
    executor: E
}

#[sql_generator(entity = User, table = "users", fields(id, name), strict)]
impl<E: SqlExecutor> Users<E> {
    pub async fn find_by_nickname(&self, nickname: &str) -> Result<Vec<User>, SqlError> {}
}

fn main() {}
