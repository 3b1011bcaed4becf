// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Placeholder extraction and classification for hand-written SQL.
//!
//! Two placeholder styles are recognised:
//!
//! - named: `:identifier`, matching `[a-zA-Z_][a-zA-Z0-9_]*`;
//! - positional: every literal `?`.
//!
//! Neither scan understands string literals or comments, so `'?'` inside a
//! literal counts as a marker. PostgreSQL casts (`value::text`) are not named
//! parameters.
//!
//! [`named_markers`] is the one scanner for `:name`; the runtime rewrite of
//! named statements to positional ones uses it too.

use std::{ops::Range, sync::OnceLock};

use regex::Regex;

use crate::plan::{OperationKind, ParameterStyle};

/// Result of analysing one SQL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuery {
    /// Original SQL.
    pub sql:        String,
    /// Statement class derived from the leading keyword.
    pub kind:       OperationKind,
    /// Unique named parameters in first-seen order.
    pub named:      Vec<String>,
    /// Number of `?` markers.
    pub positional: usize
}

impl RawQuery {
    /// Style implied by the SQL text: named when any `:name` is present.
    pub fn detected_style(&self) -> ParameterStyle {
        if self.named.is_empty() {
            ParameterStyle::Positional
        } else {
            ParameterStyle::Named
        }
    }
}

/// One `:name` occurrence in SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMarker<'a> {
    /// Identifier after the colon.
    pub name:  &'a str,
    /// Byte range of the marker, colon included.
    pub range: Range<usize>
}

/// Every `:name` marker in order, repeats included.
///
/// `::` is matched as a unit and skipped, so casts never start a marker and
/// adjacent markers (`:a:b`) are both found.
///
/// ```rust
/// use sqlgen_engine::raw::named_markers;
///
/// let names: Vec<_> = named_markers("(:a:b, x::text, :a)").map(|m| m.name).collect();
/// assert_eq!(names, ["a", "b", "a"]);
/// ```
pub fn named_markers(sql: &str) -> impl Iterator<Item = NamedMarker<'_>> {
    static NAMED: OnceLock<Regex> = OnceLock::new();
    let re = NAMED.get_or_init(|| {
        Regex::new(r"::|:([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid named parameter regex")
    });

    re.captures_iter(sql).filter_map(|caps| {
        let name = caps.get(1)?;
        Some(NamedMarker {
            name:  name.as_str(),
            range: name.start() - 1..name.end()
        })
    })
}

/// Analyse `sql`.
pub fn analyze(sql: &str) -> RawQuery {
    RawQuery {
        sql:        sql.to_string(),
        kind:       statement_kind(sql),
        named:      extract_named_parameters(sql),
        positional: count_positional_parameters(sql)
    }
}

/// Case-insensitive `INSERT`/`UPDATE`/`DELETE` prefix check after trimming.
pub fn is_update_statement(sql: &str) -> bool {
    statement_kind(sql) != OperationKind::Select
}

/// Statement class from the leading keyword; anything else is a select.
pub fn statement_kind(sql: &str) -> OperationKind {
    let head = sql.trim_start();
    let starts = |kw: &str| {
        head.get(..kw.len())
            .is_some_and(|h| h.eq_ignore_ascii_case(kw))
    };

    if starts("INSERT") {
        OperationKind::Insert
    } else if starts("UPDATE") {
        OperationKind::Update
    } else if starts("DELETE") {
        OperationKind::Delete
    } else {
        OperationKind::Select
    }
}

/// Unique `:name` parameters in first-seen order.
///
/// ```rust
/// use sqlgen_engine::raw::extract_named_parameters;
///
/// let names = extract_named_parameters("WHERE a = :a AND b = :b OR a2 = :a");
/// assert_eq!(names, ["a", "b"]);
/// ```
pub fn extract_named_parameters(sql: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for marker in named_markers(sql) {
        if !names.iter().any(|n| n == marker.name) {
            names.push(marker.name.to_string());
        }
    }
    names
}

/// Number of literal `?` characters.
pub fn count_positional_parameters(sql: &str) -> usize {
    sql.matches('?').count()
}
