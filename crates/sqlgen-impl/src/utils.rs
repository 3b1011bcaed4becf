// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for code generation.
//!
//! # Submodules
//!
//! - [`meta`] — darling adapters for engine strategy enums
//! - [`types`] — `syn` type inspection for method signatures

pub mod meta;
pub mod types;
