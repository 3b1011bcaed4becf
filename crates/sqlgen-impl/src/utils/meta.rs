// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! darling adapters for the engine's strategy enums.
//!
//! The engine types only implement [`FromStr`](std::str::FromStr); these
//! wrappers make them usable as darling attribute values.
//!
//! | Wrapper | Engine type | Example |
//! |---------|-------------|---------|
//! | [`Naming`] | `NamingStrategy` | `naming = "camel_case"` |
//! | [`Mapping`] | `MappingStrategy` | `mapping = "bean_property"` |
//! | [`Style`] | `ParameterStyle` | `parameter_type = "named"` |
//! | [`ColumnMapping`] | `Vec<(String, String)>` | `column_mapping("user_name=name")` |

use convert_case::{Case, Casing};
use darling::{FromMeta, ast::NestedMeta};
use sqlgen_engine::{MappingStrategy, NamingStrategy, ParameterStyle, mapping};
use syn::{Ident, Lit, ext::IdentExt};

macro_rules! strategy {
    ($(#[$doc:meta])* $name:ident($inner:ty)) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name(pub $inner);

        impl FromMeta for $name {
            fn from_string(value: &str) -> darling::Result<Self> {
                value
                    .parse()
                    .map(Self)
                    .map_err(|_| darling::Error::unknown_value(value))
            }
        }
    };
}

strategy! {
    /// Column naming strategy.
    Naming(NamingStrategy)
}

impl Naming {
    /// Column for a Rust field identifier.
    ///
    /// Snake and kebab columns come straight from the identifier, which is
    /// already snake_case; going through the camel form would lose the
    /// boundary after a digit (`address1_line`).
    pub fn column(self, ident: &Ident) -> String {
        let name = ident.unraw().to_string();
        match self.0 {
            NamingStrategy::SnakeCase | NamingStrategy::Custom => name,
            NamingStrategy::KebabCase => name.replace('_', "-"),
            other => other.map_column(&name.to_case(Case::Camel))
        }
    }
}

strategy! {
    /// Result mapping strategy.
    Mapping(MappingStrategy)
}

strategy! {
    /// Parameter binding style.
    Style(ParameterStyle)
}

/// `"column=property"` pairs from a list of string literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMapping(pub Vec<(String, String)>);

impl FromMeta for ColumnMapping {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match item {
                NestedMeta::Lit(Lit::Str(entry)) => entries.push(entry.value()),
                other => {
                    return Err(
                        darling::Error::custom("expected a \"column=property\" string").with_span(other)
                    );
                }
            }
        }
        Ok(Self(mapping::parse_column_mapping(
            entries.iter().map(String::as_str)
        )))
    }
}
