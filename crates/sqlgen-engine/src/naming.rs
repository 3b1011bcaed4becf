// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field and table naming strategies.
//!
//! A [`NamingStrategy`] is chosen once per generated `impl` block and passed
//! explicitly into every mapping call. Nothing here holds state.
//!
//! | Strategy | `userToken` | `UserAccount` (table) |
//! |----------|-------------|-----------------------|
//! | `SnakeCase` | `user_token` | `user_account` |
//! | `CamelCase` | `userToken` | `userAccount` |
//! | `PascalCase` | `UserToken` | `UserAccount` |
//! | `KebabCase` | `user-token` | `user-account` |
//! | `Custom` | `user_token` | `user_account` |

use std::{fmt, str::FromStr};

/// Field identifier → column identifier transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingStrategy {
    /// `userToken` → `user_token`.
    #[default]
    SnakeCase,

    /// Identity: `userToken` → `userToken`.
    CamelCase,

    /// First character upper-cased: `userToken` → `UserToken`.
    PascalCase,

    /// `userToken` → `user-token`.
    KebabCase,

    /// Reserved for user-supplied transforms; currently maps like
    /// [`SnakeCase`](Self::SnakeCase).
    Custom
}

impl NamingStrategy {
    /// Map a camel-cased field identifier to its column name.
    ///
    /// A digit never starts a boundary (`address1Line` → `address1line`);
    /// such fields need [`EntitySchema::with_column`](crate::EntitySchema::with_column).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sqlgen_engine::NamingStrategy;
    ///
    /// assert_eq!(NamingStrategy::SnakeCase.map_column("userToken"), "user_token");
    /// assert_eq!(NamingStrategy::KebabCase.map_column("userToken"), "user-token");
    /// ```
    pub fn map_column(self, field: &str) -> String {
        match self {
            Self::CamelCase => field.to_string(),
            Self::PascalCase => upper_first(field),
            Self::KebabCase => split_lower_upper(field, '-'),
            Self::SnakeCase | Self::Custom => split_lower_upper(field, '_')
        }
    }

    /// Derive a table name from an entity's simple type name.
    ///
    /// The first character is lower-cased before the strategy applies, except
    /// for [`PascalCase`](Self::PascalCase) which keeps the type name.
    pub fn table_name(self, entity: &str) -> String {
        match self {
            Self::PascalCase => entity.to_string(),
            other => other.map_column(&lower_first(entity))
        }
    }

    /// Attribute spelling of this strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SnakeCase => "snake_case",
            Self::CamelCase => "camelCase",
            Self::PascalCase => "PascalCase",
            Self::KebabCase => "kebab-case",
            Self::Custom => "custom"
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised naming strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown naming strategy `{0}`, expected one of: snake_case, camelCase, PascalCase, kebab-case, custom"
)]
pub struct ParseNamingStrategyError(pub String);

impl FromStr for NamingStrategy {
    type Err = ParseNamingStrategyError;

    /// Accepts the attribute spellings, ignoring case and `_`/`-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "snakecase" | "snake" => Ok(Self::SnakeCase),
            "camelcase" | "camel" => Ok(Self::CamelCase),
            "pascalcase" | "pascal" => Ok(Self::PascalCase),
            "kebabcase" | "kebab" => Ok(Self::KebabCase),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseNamingStrategyError(s.to_string()))
        }
    }
}

/// Insert `sep` wherever a lowercase ASCII letter is followed by an uppercase
/// one, then lowercase everything. Uppercase runs stay together.
fn split_lower_upper(field: &str, sep: char) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    let mut prev_lower = false;

    for c in field.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(sep);
        }
        prev_lower = c.is_ascii_lowercase();
        out.extend(c.to_lowercase());
    }

    out
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}

pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new()
    }
}
