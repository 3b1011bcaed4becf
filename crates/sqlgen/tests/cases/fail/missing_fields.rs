// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use sqlgen::sql_generator;

pub struct User;

pub struct Users {
    executor: ()
}

#[sql_generator(entity = User)]
impl Users {}

fn main() {}
