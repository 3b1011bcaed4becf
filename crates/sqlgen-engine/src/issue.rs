// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Advisory diagnostics.
//!
//! Issues never stop generation on their own. The front end decides whether
//! to surface them as warnings or, in strict mode, as hard errors.

/// A problem found while planning or emitting one method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Issue {
    /// A condition names a field the entity does not declare.
    #[error("`{method}`: field `{field}` is not declared on the entity")]
    UnknownField {
        /// Method name.
        method: String,
        /// Offending field.
        field:  String
    },

    /// Declared parameters do not match the placeholder count.
    #[error("`{method}`: SQL expects {expected} parameter(s) but {found} declared")]
    ParameterCountMismatch {
        /// Method name.
        method:   String,
        /// Placeholders in the SQL.
        expected: usize,
        /// Parameters on the signature.
        found:    usize
    },

    /// A `:name` placeholder has no parameter bound to it.
    #[error("`{method}`: named parameter `:{name}` has no matching method parameter")]
    ParameterNameMismatch {
        /// Method name.
        method: String,
        /// Unbound placeholder.
        name:   String
    },

    /// The method name fits no supported convention.
    #[error("`{method}`: method name does not match any supported query pattern")]
    UnsupportedMethodPattern {
        /// Method name.
        method: String
    },

    /// The return shape fits no mapping rule; a single-row mapping is used.
    #[error("`{method}`: cannot infer a result mapping for `{target}`, mapping a single row")]
    AmbiguousMappingError {
        /// Method name.
        method: String,
        /// Rendered return shape.
        target: String
    },

    /// A generation stage failed and the next fallback was tried.
    #[error("`{method}`: {stage} failed: {reason}")]
    EmissionFailed {
        /// Method name.
        method: String,
        /// Stage that failed.
        stage:  String,
        /// Failure text.
        reason: String
    },

    /// Generated bodies await the executor, so the method must be `async`.
    #[error("`{method}`: generated methods must be `async`")]
    NotAsync {
        /// Method name.
        method: String
    },

    /// The declared return type cannot carry a generated result.
    #[error("`{method}`: unsupported return type: {reason}")]
    UnsupportedReturn {
        /// Method name.
        method: String,
        /// Explanation.
        reason: String
    }
}

impl Issue {
    /// Method the issue belongs to.
    pub fn method(&self) -> &str {
        match self {
            Self::UnknownField {
                method, ..
            }
            | Self::ParameterCountMismatch {
                method, ..
            }
            | Self::ParameterNameMismatch {
                method, ..
            }
            | Self::UnsupportedMethodPattern {
                method
            }
            | Self::AmbiguousMappingError {
                method, ..
            }
            | Self::EmissionFailed {
                method, ..
            }
            | Self::NotAsync {
                method
            }
            | Self::UnsupportedReturn {
                method, ..
            } => method
        }
    }

    /// Stable snake_case identifier of the issue kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownField {
                ..
            } => "unknown_field",
            Self::ParameterCountMismatch {
                ..
            } => "parameter_count_mismatch",
            Self::ParameterNameMismatch {
                ..
            } => "parameter_name_mismatch",
            Self::UnsupportedMethodPattern {
                ..
            } => "unsupported_method_pattern",
            Self::AmbiguousMappingError {
                ..
            } => "ambiguous_mapping",
            Self::EmissionFailed {
                ..
            } => "emission_failed",
            Self::NotAsync {
                ..
            } => "not_async",
            Self::UnsupportedReturn {
                ..
            } => "unsupported_return"
        }
    }
}
