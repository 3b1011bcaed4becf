// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter ↔ placeholder planning.
//!
//! Mismatches between declared parameters and SQL placeholders are reported
//! as [`Issue`]s and never stop planning.

use crate::{
    issue::Issue,
    mapping::TypeRef,
    statement::{PlaceholderSource, SqlStatement}
};

/// A parameter as written on the method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParameter {
    /// Identifier.
    pub name:   String,
    /// Explicit binding name from `#[param("…")]`.
    pub rename: Option<String>,
    /// Declared type.
    pub ty:     TypeRef
}

impl DeclaredParameter {
    /// Parameter without a rename.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            rename: None,
            ty
        }
    }

    /// Set the binding name.
    #[must_use]
    pub fn renamed(mut self, rename: impl Into<String>) -> Self {
        self.rename = Some(rename.into());
        self
    }
}

/// Where a bound value is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingSource {
    /// The parameter itself.
    Argument,
    /// A field of the parameter (the entity of `save`/`update`).
    Field {
        /// Entity field.
        field: String
    }
}

/// One planned binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    /// Parameter identifier on the signature.
    pub declared_name:    String,
    /// Name used for named binding.
    pub binding_name:     String,
    /// Bound as a list value.
    pub is_collection:    bool,
    /// Declaration index of the parameter.
    pub positional_index: Option<usize>,
    /// Value source.
    pub source:           BindingSource
}

/// Classify declared parameters in declaration order.
pub fn classify(params: &[DeclaredParameter]) -> Vec<ParameterInfo> {
    params
        .iter()
        .enumerate()
        .map(|(index, p)| ParameterInfo {
            declared_name:    p.name.clone(),
            binding_name:     p.rename.clone().unwrap_or_else(|| p.name.clone()),
            is_collection:    p.ty.is_collection(),
            positional_index: Some(index),
            source:           BindingSource::Argument
        })
        .collect()
}

/// Every `:name` needs a parameter whose binding name matches.
pub fn validate_named(method: &str, names: &[String], params: &[ParameterInfo]) -> Vec<Issue> {
    names
        .iter()
        .filter(|name| !params.iter().any(|p| &p.binding_name == *name))
        .map(|name| Issue::ParameterNameMismatch {
            method: method.to_string(),
            name:   name.clone()
        })
        .collect()
}

/// The placeholder count must equal the parameter count.
pub fn validate_positional(method: &str, count: usize, params: &[ParameterInfo]) -> Vec<Issue> {
    if count == params.len() {
        Vec::new()
    } else {
        vec![Issue::ParameterCountMismatch {
            method:   method.to_string(),
            expected: count,
            found:    params.len()
        }]
    }
}

/// Bindings for a derived query: the declared parameters bind the WHERE
/// placeholders in order.
pub fn plan_derived(
    method: &str,
    statement: &SqlStatement,
    params: &[DeclaredParameter]
) -> (Vec<ParameterInfo>, Vec<Issue>) {
    let bindings = classify(params);
    let issues = validate_positional(method, statement.placeholder_count(), &bindings);
    (bindings, issues)
}

/// Bindings for `save`/`update`: each placeholder reads a field of the first
/// parameter.
///
/// # Errors
///
/// [`Issue::ParameterCountMismatch`] when the method takes no entity.
pub fn plan_entity(
    method: &str,
    statement: &SqlStatement,
    params: &[DeclaredParameter]
) -> Result<(Vec<ParameterInfo>, Vec<Issue>), Issue> {
    let entity = params.first().ok_or_else(|| Issue::ParameterCountMismatch {
        method:   method.to_string(),
        expected: 1,
        found:    0
    })?;

    let bindings = statement
        .placeholders
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let field = match source {
                PlaceholderSource::Field(field)
                | PlaceholderSource::Condition {
                    field, ..
                } => field.clone()
            };
            ParameterInfo {
                declared_name:    entity.name.clone(),
                binding_name:     field.clone(),
                is_collection:    false,
                positional_index: Some(index),
                source:           BindingSource::Field {
                    field
                }
            }
        })
        .collect();

    let issues = if params.len() > 1 {
        vec![Issue::ParameterCountMismatch {
            method:   method.to_string(),
            expected: 1,
            found:    params.len()
        }]
    } else {
        Vec::new()
    };

    Ok((bindings, issues))
}
