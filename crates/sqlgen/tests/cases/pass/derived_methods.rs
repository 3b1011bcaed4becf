// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Every derived operation on a generic repository.

use sqlgen::{FromRow, SqlError, SqlExecutor, sql_generator};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id:         i64,
    pub name:       String,
    pub email:      String,
    pub user_token: String,
    pub active:     bool
}

pub struct UserRepository<E> {
    executor: E
}

#[sql_generator(entity = User, table = "users", fields(id, name, email, user_token, active))]
impl<E: SqlExecutor> UserRepository<E> {
    pub async fn find_all(&self) -> Result<Vec<User>, SqlError> {}

    pub async fn find_by_id(&self, id: i64) -> Result<User, SqlError> {}

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, SqlError> {}

    pub async fn find_by_name_and_active(&self, name: &str, active: bool) -> Result<Vec<User>, SqlError> {}

    pub async fn find_by_id_greater_than_order_by_name_desc(&self, id: i64) -> Result<Vec<User>, SqlError> {}

    pub async fn count_by_active(&self, active: bool) -> Result<i64, SqlError> {}

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, SqlError> {}

    pub async fn delete_by_user_token(&self, user_token: String) -> Result<u64, SqlError> {}

    pub async fn save(&self, user: &User) -> Result<(), SqlError> {}

    pub async fn update(&self, user: User) -> Result<u64, SqlError> {}
}

fn main() {
    fn _is_send<T: Send>(_: T) {}
    fn _check<E: SqlExecutor>(repo: &UserRepository<E>) {
        _is_send(repo.find_all());
        _is_send(repo.count_by_active(true));
    }
}
