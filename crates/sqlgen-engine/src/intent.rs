// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method-name grammar.
//!
//! Convention methods are camel-cased names made of an operation prefix and an
//! optional condition suffix:
//!
//! ```text
//! findBy   Name   And   Age GreaterThan
//! ──────   ────   ───   ─── ───────────
//! prefix   field  conn  field operator
//! ```
//!
//! | Prefix | Operation |
//! |--------|-----------|
//! | `findAll`, `findAllBy…` | [`Operation::FindAll`] |
//! | `findBy…` | [`Operation::Find`] |
//! | `countBy…` | [`Operation::Count`] |
//! | `deleteBy…` | [`Operation::Delete`] |
//! | `existsBy…` | [`Operation::Exists`] |
//! | `save…` | [`Operation::Save`] |
//! | `update…` | [`Operation::Update`] |
//! | anything else | [`Operation::Unknown`] |
//!
//! Parsing never fails. Names that fit no prefix produce
//! [`Operation::Unknown`], which downstream stages treat as unsupported.
//!
//! # Condition boundaries
//!
//! The suffix is split before every `And`/`Or` token that is not at the very
//! start and is followed by an uppercase letter. `findByOrderNumber` and
//! `findByBrandName` therefore stay single fields, while `findByNameOrEmail`
//! splits in two.

use std::fmt;

/// Operation selected by the method prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `findBy…`: rows matching the conditions.
    Find,
    /// `findAll`: every row, optionally filtered by `By…` conditions.
    FindAll,
    /// `countBy…`: `COUNT(*)`.
    Count,
    /// `deleteBy…`: `DELETE` matching rows.
    Delete,
    /// `existsBy…`: whether any row matches.
    Exists,
    /// `save…`: `INSERT` every entity field.
    Save,
    /// `update…`: `UPDATE` non-key fields by primary key.
    Update,
    /// No recognised prefix.
    Unknown
}

/// How a condition links to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connector {
    /// `And` keyword.
    And,
    /// `Or` keyword.
    Or,
    /// First condition, or no keyword recorded. Joins as `AND`.
    #[default]
    None
}

impl Connector {
    /// SQL joiner placed before the condition.
    pub const fn sql_token(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And | Self::None => "AND"
        }
    }
}

/// Comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// `= ?`
    #[default]
    Equal,
    /// `!= ?`
    NotEqual,
    /// `> ?`
    GreaterThan,
    /// `>= ?`
    GreaterThanEqual,
    /// `< ?`
    LessThan,
    /// `<= ?`
    LessThanEqual,
    /// `LIKE ?`
    Like,
    /// `NOT LIKE ?`
    NotLike,
    /// `IN (?)`
    In,
    /// `NOT IN (?)`
    NotIn,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
    /// `BETWEEN ? AND ?`
    Between,
    /// `NOT BETWEEN ? AND ?`
    NotBetween,
    /// `LIKE ?`
    Containing,
    /// `NOT LIKE ?`
    NotContaining,
    /// `LIKE ?`
    StartingWith,
    /// `LIKE ?`
    EndingWith
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterThanEqual,
        Self::LessThan,
        Self::LessThanEqual,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::IsNotNull,
        Self::Between,
        Self::NotBetween,
        Self::Containing,
        Self::NotContaining,
        Self::StartingWith,
        Self::EndingWith
    ];

    /// Keyword as it appears at the end of a condition segment.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanEqual => "GreaterThanEqual",
            Self::LessThan => "LessThan",
            Self::LessThanEqual => "LessThanEqual",
            Self::Like => "Like",
            Self::NotLike => "NotLike",
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
            Self::Between => "Between",
            Self::NotBetween => "NotBetween",
            Self::Containing => "Containing",
            Self::NotContaining => "NotContaining",
            Self::StartingWith => "StartingWith",
            Self::EndingWith => "EndingWith"
        }
    }

    /// SQL comparison token.
    pub const fn sql_token(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::Like | Self::Containing | Self::StartingWith | Self::EndingWith => "LIKE",
            Self::NotLike | Self::NotContaining => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN"
        }
    }

    /// Number of `?` markers this operator contributes to a WHERE clause.
    pub const fn placeholder_count(self) -> usize {
        match self {
            Self::IsNull | Self::IsNotNull => 0,
            Self::Between | Self::NotBetween => 2,
            _ => 1
        }
    }

    /// Longest keyword that `segment` ends with, leaving a non-empty field.
    fn strip_from(segment: &str) -> Option<(&str, Self)> {
        Self::ALL
            .into_iter()
            .filter(|op| segment.len() > op.keyword().len() && segment.ends_with(op.keyword()))
            .max_by_key(|op| op.keyword().len())
            .map(|op| (&segment[..segment.len() - op.keyword().len()], op))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `field operator` pair and its link to the previous condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Camel-cased field identifier.
    pub field:     String,
    /// Comparison.
    pub operator:  Operator,
    /// Link to the previous condition.
    pub connector: Connector
}

/// Parsed representation of a convention method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMethodDescriptor {
    /// Operation chosen by the prefix.
    pub operation:   Operation,
    /// Conditions in declared order.
    pub conditions:  Vec<Condition>,
    /// Name the descriptor was parsed from.
    pub source_name: String
}

impl QueryMethodDescriptor {
    /// Condition fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|c| c.field.as_str())
    }

    /// Total `?` markers the WHERE clause will carry.
    pub fn where_placeholder_count(&self) -> usize {
        self.conditions
            .iter()
            .map(|c| c.operator.placeholder_count())
            .sum()
    }
}

/// Parse a camel-cased method name.
///
/// # Examples
///
/// ```rust
/// use sqlgen_engine::{Connector, Operation, Operator, intent};
///
/// let d = intent::parse("findByNameAndAgeGreaterThan");
/// assert_eq!(d.operation, Operation::Find);
/// assert_eq!(d.fields().collect::<Vec<_>>(), ["name", "age"]);
/// assert_eq!(d.conditions[1].operator, Operator::GreaterThan);
/// assert_eq!(d.conditions[1].connector, Connector::And);
/// ```
pub fn parse(method_name: &str) -> QueryMethodDescriptor {
    let (operation, suffix) = split_prefix(method_name);
    let conditions = suffix.map(parse_conditions).unwrap_or_default();

    QueryMethodDescriptor {
        operation,
        conditions,
        source_name: method_name.to_string()
    }
}

fn split_prefix(name: &str) -> (Operation, Option<&str>) {
    if let Some(rest) = name.strip_prefix("findAll") {
        return (Operation::FindAll, rest.strip_prefix("By"));
    }

    const CONDITIONAL: [(&str, Operation); 4] = [
        ("findBy", Operation::Find),
        ("countBy", Operation::Count),
        ("deleteBy", Operation::Delete),
        ("existsBy", Operation::Exists)
    ];
    for (prefix, operation) in CONDITIONAL {
        if let Some(rest) = name.strip_prefix(prefix) {
            return (operation, Some(rest));
        }
    }

    if name.starts_with("save") {
        (Operation::Save, None)
    } else if name.starts_with("update") {
        (Operation::Update, None)
    } else {
        (Operation::Unknown, None)
    }
}

fn parse_conditions(suffix: &str) -> Vec<Condition> {
    split_segments(suffix)
        .into_iter()
        .filter_map(parse_segment)
        .collect()
}

/// Split before each `And`/`Or` boundary; the keyword stays on the right.
fn split_segments(suffix: &str) -> Vec<&str> {
    let bytes = suffix.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        if is_boundary(bytes, i, b"And") || is_boundary(bytes, i, b"Or") {
            segments.push(&suffix[start..i]);
            start = i;
        }
    }
    segments.push(&suffix[start..]);
    segments
}

fn is_boundary(bytes: &[u8], at: usize, token: &[u8]) -> bool {
    bytes[at..].starts_with(token)
        && bytes
            .get(at + token.len())
            .is_some_and(u8::is_ascii_uppercase)
}

fn parse_segment(segment: &str) -> Option<Condition> {
    let (connector, rest) = if let Some(rest) = strip_connector(segment, "And") {
        (Connector::And, rest)
    } else if let Some(rest) = strip_connector(segment, "Or") {
        (Connector::Or, rest)
    } else {
        (Connector::None, segment)
    };

    if rest.is_empty() {
        return None;
    }

    let (field, operator) = Operator::strip_from(rest).unwrap_or((rest, Operator::Equal));

    Some(Condition {
        field: crate::naming::lower_first(field),
        operator,
        connector
    })
}

fn strip_connector<'a>(segment: &'a str, keyword: &str) -> Option<&'a str> {
    segment
        .strip_prefix(keyword)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
}
