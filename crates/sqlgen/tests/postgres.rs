// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated methods running on a live PostgreSQL pool.
//!
//! Needs `DATABASE_URL`; run with
//! `cargo test --features postgres -- --ignored`.

#![cfg(feature = "postgres")]

use pretty_assertions::assert_eq;
use sqlgen::{FromRow, SqlError, sql_generator};
use sqlx::{PgPool, postgres::PgPoolOptions};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Account {
    pub id:            i64,
    pub owner:         String,
    pub address1_line: Option<String>,
    pub active:        bool
}

struct Accounts {
    executor: PgPool
}

#[sql_generator(entity = Account, table = "accounts", fields(id, owner, address1_line, active))]
impl Accounts {
    async fn save(&self, account: &Account) -> Result<(), SqlError> {}

    async fn find_by_owner(&self, owner: &str) -> Result<Option<Account>, SqlError> {}

    async fn find_by_address1_line(&self, line: &str) -> Result<Vec<Account>, SqlError> {}

    async fn count_by_active(&self, active: bool) -> Result<i64, SqlError> {}

    async fn exists_by_owner(&self, owner: &str) -> Result<bool, SqlError> {}

    async fn delete_by_id(&self, id: i64) -> Result<u64, SqlError> {}

    #[native_query(sql = "SELECT * FROM accounts WHERE id = ANY(:ids) ORDER BY id")]
    async fn by_ids(&self, ids: Vec<i64>) -> Result<Vec<Account>, SqlError> {}
}

fn account(id: i64, owner: &str, line: Option<&str>) -> Account {
    Account {
        id,
        owner: owner.into(),
        address1_line: line.map(Into::into),
        active: true
    }
}

async fn accounts() -> Accounts {
    let url = std::env::var("DATABASE_URL").unwrap();
    // one connection keeps the temporary table visible to every query
    let pool = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
    sqlx::query(
        "CREATE TEMPORARY TABLE accounts (
            id BIGINT PRIMARY KEY,
            owner TEXT NOT NULL,
            address1_line TEXT,
            active BOOLEAN NOT NULL
        )"
    )
    .execute(&pool)
    .await
    .unwrap();
    Accounts {
        executor: pool
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn round_trip_through_postgres() {
    let repo = accounts().await;
    let ann = account(1, "ann", Some("1 Main St"));
    let bob = account(2, "bob", None);
    repo.save(&ann).await.unwrap();
    repo.save(&bob).await.unwrap();

    assert_eq!(repo.find_by_owner("bob").await.unwrap(), Some(bob.clone()));
    assert_eq!(repo.find_by_owner("cid").await.unwrap(), None);
    assert_eq!(repo.find_by_address1_line("1 Main St").await.unwrap(), vec![ann.clone()]);
    assert_eq!(repo.count_by_active(true).await.unwrap(), 2);
    assert!(repo.exists_by_owner("ann").await.unwrap());
    assert_eq!(repo.by_ids(vec![2, 1]).await.unwrap(), vec![ann, bob]);

    assert_eq!(repo.delete_by_id(2).await.unwrap(), 1);
    assert_eq!(repo.count_by_active(true).await.unwrap(), 1);
}
