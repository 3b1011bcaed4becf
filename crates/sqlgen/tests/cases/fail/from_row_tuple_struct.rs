// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use sqlgen::FromRow;

#[derive(FromRow)]
pub struct Pair(i64, i64);

fn main() {}
