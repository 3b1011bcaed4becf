// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result mapping resolution.
//!
//! Maps a declared return shape and a [`MappingStrategy`] to a
//! [`ResultMappingPlan`] and a [`Cardinality`].
//!
//! # Auto decision tree
//!
//! ```text
//! ()                   ─► Void
//! Vec<Map<String, _>>  ─► List     ColumnMap
//! Vec<scalar>          ─► List     Scalar
//! Vec<T>               ─► List     Bean
//! bool                 ─► Boolean  Scalar(Bool)
//! scalar               ─► Scalar   Scalar(kind)
//! Option<T>            ─► Optional (same rules for T)
//! T                    ─► Single   Bean
//! anything else        ─► Single   Bean + AmbiguousMappingError
//! ```
//!
//! `Manual`, `BeanProperty` and `Nested` skip the per-row tree: rows are
//! renamed with the column mapping, then decoded as beans. Cardinality still
//! follows the declared shape.

use std::{fmt, str::FromStr};

use crate::{issue::Issue, plan::Cardinality};

/// Primitive value kinds with an explicit decode cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Text.
    Text,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Floating point.
    Double,
    /// Boolean.
    Bool,
    /// Arbitrary precision decimal.
    Decimal
}

/// Compiler-independent description of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// No value.
    Unit,
    /// A scalar and its spelled name.
    Scalar(ScalarKind, String),
    /// A collection of elements.
    Sequence(Box<TypeRef>),
    /// Zero or one value.
    Optional(Box<TypeRef>),
    /// A key/value map.
    Map {
        /// Key type.
        key:   Box<TypeRef>,
        /// Value type.
        value: Box<TypeRef>
    },
    /// A user type, by path.
    Named(String),
    /// Anything not representable above.
    Other(String)
}

impl TypeRef {
    /// Shorthand for [`TypeRef::Sequence`].
    pub fn sequence(inner: TypeRef) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Shorthand for [`TypeRef::Optional`].
    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Shorthand for [`TypeRef::Map`].
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key:   Box::new(key),
            value: Box::new(value)
        }
    }

    /// Shorthand for [`TypeRef::Named`].
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(path.into())
    }

    /// `true` for sequences.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// `true` for a map keyed by text.
    pub fn is_string_keyed_map(&self) -> bool {
        matches!(self, Self::Map { key, .. } if matches!(**key, Self::Scalar(ScalarKind::Text, _)))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::Scalar(_, name) | Self::Named(name) | Self::Other(name) => f.write_str(name),
            Self::Sequence(inner) => write!(f, "Vec<{inner}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Map {
                key,
                value
            } => write!(f, "HashMap<{key}, {value}>")
        }
    }
}

/// How rows become values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MappingStrategy {
    /// Decide from the return shape.
    #[default]
    Auto,
    /// Caller-supplied column mapping.
    Manual,
    /// Rename columns to properties, then decode.
    BeanProperty,
    /// Treated as [`Auto`](Self::Auto).
    Constructor,
    /// Dotted properties from prefixed columns.
    Nested
}

impl MappingStrategy {
    /// Whether rows go through the column mapping before decoding.
    pub const fn remaps(self) -> bool {
        matches!(self, Self::Manual | Self::BeanProperty | Self::Nested)
    }
}

/// Error for an unrecognised mapping strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown mapping strategy `{0}`, expected one of: auto, manual, bean_property, constructor, nested"
)]
pub struct ParseMappingStrategyError(pub String);

impl FromStr for MappingStrategy {
    type Err = ParseMappingStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            "beanproperty" => Ok(Self::BeanProperty),
            "constructor" => Ok(Self::Constructor),
            "nested" => Ok(Self::Nested),
            _ => Err(ParseMappingStrategyError(s.to_string()))
        }
    }
}

/// Per-row conversion chosen for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowMapping {
    /// Decode the whole row into the target type.
    Bean,
    /// Keep the row as a column → value map.
    ColumnMap,
    /// Read the first column with a widening cast.
    Scalar(ScalarKind),
    /// Rename columns with the column mapping, then decode.
    Remapped,
    /// No rows are read.
    None
}

/// How a method's result is produced from rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMappingPlan {
    /// Requested strategy.
    pub strategy:       MappingStrategy,
    /// Per-row target type; the element type for lists and optionals.
    pub target_type:    TypeRef,
    /// `(column, property)` pairs in declared order.
    pub column_mapping: Vec<(String, String)>,
    /// Per-row conversion.
    pub row:            RowMapping,
    /// Row type decoded first and converted into `target_type`.
    pub via:            Option<TypeRef>
}

/// Output of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Mapping plan.
    pub plan:        ResultMappingPlan,
    /// Shape of the method result.
    pub cardinality: Cardinality,
    /// Advisory problems.
    pub issues:      Vec<Issue>
}

/// Resolve the mapping for `shape`.
///
/// `via` is an explicit row type that is decoded first and converted into
/// the declared element type.
pub fn resolve(
    method: &str,
    shape: &TypeRef,
    strategy: MappingStrategy,
    column_mapping: Vec<(String, String)>,
    via: Option<TypeRef>
) -> Resolution {
    let (cardinality, target, row) = if strategy.remaps() {
        remapped(shape)
    } else {
        auto(shape)
    };

    let mut issues = Vec::new();
    let (cardinality, target, row) = match (cardinality, target, row) {
        (Some(c), Some(t), r) => (c, t, r),
        _ => {
            issues.push(Issue::AmbiguousMappingError {
                method: method.to_string(),
                target: shape.to_string()
            });
            (Cardinality::Single, shape.clone(), RowMapping::Bean)
        }
    };

    let via = via.filter(|_| matches!(row, RowMapping::Bean | RowMapping::Remapped));

    Resolution {
        plan: ResultMappingPlan {
            strategy,
            target_type: target,
            column_mapping,
            row,
            via
        },
        cardinality,
        issues
    }
}

/// Parse `"column=property"` entries; malformed entries map a column to
/// itself.
pub fn parse_column_mapping<'a>(entries: impl IntoIterator<Item = &'a str>) -> Vec<(String, String)> {
    entries
        .into_iter()
        .map(|entry| match entry.split_once('=') {
            Some((column, property)) => (column.trim().to_string(), property.trim().to_string()),
            None => (entry.trim().to_string(), entry.trim().to_string())
        })
        .collect()
}

type Decision = (Option<Cardinality>, Option<TypeRef>, RowMapping);

fn auto(shape: &TypeRef) -> Decision {
    match shape {
        TypeRef::Unit => (Some(Cardinality::Void), Some(TypeRef::Unit), RowMapping::None),
        TypeRef::Scalar(kind, _) => (Some(scalar_cardinality(*kind)), Some(shape.clone()), RowMapping::Scalar(*kind)),
        TypeRef::Sequence(inner) => match element(inner) {
            Some(row) => (Some(Cardinality::List), Some((**inner).clone()), row),
            None => (None, None, RowMapping::Bean)
        },
        TypeRef::Optional(inner) => match element(inner) {
            Some(row) => (Some(Cardinality::Optional), Some((**inner).clone()), row),
            None => (None, None, RowMapping::Bean)
        },
        TypeRef::Named(_) => (Some(Cardinality::Single), Some(shape.clone()), RowMapping::Bean),
        TypeRef::Map { .. } | TypeRef::Other(_) => (None, None, RowMapping::Bean)
    }
}

fn remapped(shape: &TypeRef) -> Decision {
    match shape {
        TypeRef::Unit => (Some(Cardinality::Void), Some(TypeRef::Unit), RowMapping::None),
        TypeRef::Scalar(kind, _) => (Some(scalar_cardinality(*kind)), Some(shape.clone()), RowMapping::Scalar(*kind)),
        TypeRef::Sequence(inner) => (Some(Cardinality::List), Some((**inner).clone()), RowMapping::Remapped),
        TypeRef::Optional(inner) => (Some(Cardinality::Optional), Some((**inner).clone()), RowMapping::Remapped),
        TypeRef::Named(_) | TypeRef::Map { .. } | TypeRef::Other(_) => {
            (Some(Cardinality::Single), Some(shape.clone()), RowMapping::Remapped)
        }
    }
}

fn element(inner: &TypeRef) -> Option<RowMapping> {
    match inner {
        TypeRef::Named(_) => Some(RowMapping::Bean),
        TypeRef::Scalar(kind, _) => Some(RowMapping::Scalar(*kind)),
        map if map.is_string_keyed_map() => Some(RowMapping::ColumnMap),
        _ => None
    }
}

fn scalar_cardinality(kind: ScalarKind) -> Cardinality {
    match kind {
        ScalarKind::Bool => Cardinality::Boolean,
        _ => Cardinality::Scalar
    }
}
