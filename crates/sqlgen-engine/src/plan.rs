// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The assembled execution plan handed to a [`CodeEmitter`](crate::CodeEmitter).

use std::{fmt, str::FromStr};

use crate::{binding::ParameterInfo, mapping::ResultMappingPlan};

/// Statement class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Reads rows.
    Select,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete
}

impl OperationKind {
    /// `true` for statements that modify rows.
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Select)
    }
}

/// How parameters are attached to the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterStyle {
    /// `?` markers bound in order.
    #[default]
    Positional,
    /// `:name` markers bound by name.
    Named
}

/// Error for an unrecognised parameter style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter style `{0}`, expected `positional` or `named`")]
pub struct ParseParameterStyleError(pub String);

impl FromStr for ParameterStyle {
    type Err = ParseParameterStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "named" => Ok(Self::Named),
            _ => Err(ParseParameterStyleError(s.to_string()))
        }
    }
}

/// Shape of a method result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one row.
    Single,
    /// Zero or one row.
    Optional,
    /// Any number of rows.
    List,
    /// One scalar value.
    Scalar,
    /// One boolean value.
    Boolean,
    /// Nothing; affected-row counts are discarded.
    Void
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Optional => "optional",
            Self::List => "list",
            Self::Scalar => "scalar",
            Self::Boolean => "boolean",
            Self::Void => "void"
        };
        f.write_str(name)
    }
}

/// Everything a backend needs to emit one method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExecutionPlan {
    /// Method name as parsed.
    pub method:         String,
    /// Final SQL text.
    pub sql:            String,
    /// Statement class.
    pub operation_kind: OperationKind,
    /// Binding style.
    pub style:          ParameterStyle,
    /// Bindings, one per `?` for positional plans, one per name for named.
    pub bindings:       Vec<ParameterInfo>,
    /// Result mapping.
    pub mapping:        ResultMappingPlan,
    /// Result shape.
    pub cardinality:    Cardinality
}
