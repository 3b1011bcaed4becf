// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use sqlgen::FromRow;

#[derive(FromRow)]
pub struct User {
    pub id:      i64,
    #[from_row(skip, nested)]
    pub profile: String
}

fn main() {}
