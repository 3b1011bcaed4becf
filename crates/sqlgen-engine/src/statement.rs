// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL rendering for parsed convention methods.
//!
//! | Operation | SQL |
//! |-----------|-----|
//! | Find, FindAll | `SELECT * FROM t [WHERE …]` |
//! | Count | `SELECT COUNT(*) FROM t [WHERE …]` |
//! | Exists | see [`ExistsStrategy`] |
//! | Delete | `DELETE FROM t [WHERE …]` |
//! | Save | `INSERT INTO t (c1, c2) VALUES (?, ?)` |
//! | Update | `UPDATE t SET c2 = ?, c3 = ? [WHERE pk = ?]` |
//!
//! WHERE conditions are emitted in declared order. The `n`-th `?` in the
//! output is described by `placeholders[n]`, so callers can bind without
//! re-parsing the SQL.

use crate::{
    intent::{Condition, Operation, Operator, QueryMethodDescriptor},
    naming::NamingStrategy,
    plan::OperationKind,
    schema::EntitySchema
};

/// What a single `?` marker binds to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderSource {
    /// The `index`-th condition of the descriptor. `BETWEEN` yields two
    /// markers with the same index.
    Condition {
        /// Position in [`QueryMethodDescriptor::conditions`].
        index: usize,
        /// Condition field.
        field: String
    },

    /// An entity field, for INSERT/UPDATE.
    Field(String)
}

/// Rendered statement plus its placeholder sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    /// SQL text with `?` markers.
    pub sql:          String,
    /// Statement class.
    pub kind:         OperationKind,
    /// One entry per `?`, in order.
    pub placeholders: Vec<PlaceholderSource>
}

impl SqlStatement {
    /// Number of `?` markers.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }
}

/// Per-method failure while rendering SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The descriptor has no renderable operation.
    #[error("`{method}` has no recognised operation prefix")]
    UnknownOperation {
        /// Method name.
        method: String
    },

    /// INSERT/UPDATE need at least one entity field.
    #[error("`{method}` needs entity fields but the schema declares none")]
    EmptySchema {
        /// Method name.
        method: String
    },

    /// Every field is the primary key, so there is nothing to SET.
    #[error("`{method}` has no non-key fields to update")]
    NothingToSet {
        /// Method name.
        method: String
    },

    /// The exists strategy produces no statement.
    #[error("exists strategy `{0:?}` renders no SQL")]
    NoStatement(ExistsStrategy)
}

/// Ways to answer an `existsBy…` method, tried in [`CHAIN`](Self::CHAIN) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExistsStrategy {
    /// `SELECT CASE WHEN COUNT(*) > 0 THEN TRUE ELSE FALSE END FROM t …`
    BooleanCase,
    /// `SELECT COUNT(*) FROM t …`, compared `> 0` by the caller.
    CountComparison,
    /// No query; the method returns `false`.
    LiteralFalse
}

impl ExistsStrategy {
    /// Fallback order.
    pub const CHAIN: [Self; 3] = [Self::BooleanCase, Self::CountComparison, Self::LiteralFalse];

    fn projection(self) -> Option<&'static str> {
        match self {
            Self::BooleanCase => Some("CASE WHEN COUNT(*) > 0 THEN TRUE ELSE FALSE END"),
            Self::CountComparison => Some("COUNT(*)"),
            Self::LiteralFalse => None
        }
    }
}

/// Render `descriptor` against `schema`.
///
/// `existsBy…` methods use [`ExistsStrategy::BooleanCase`]; see
/// [`build_exists`] for the other strategies.
///
/// # Errors
///
/// See [`BuildError`].
pub fn build(
    descriptor: &QueryMethodDescriptor,
    schema: &EntitySchema,
    naming: NamingStrategy
) -> Result<SqlStatement, BuildError> {
    let table = schema.table_name();
    let method = || descriptor.source_name.clone();

    match descriptor.operation {
        Operation::Find | Operation::FindAll => {
            Ok(select(format!("SELECT * FROM {table}"), descriptor, schema, naming))
        }
        Operation::Count => Ok(select(
            format!("SELECT COUNT(*) FROM {table}"),
            descriptor,
            schema,
            naming
        )),
        Operation::Exists => build_exists(descriptor, schema, naming, ExistsStrategy::BooleanCase),
        Operation::Delete => {
            let (clause, placeholders) = where_clause(&descriptor.conditions, schema, naming);
            Ok(SqlStatement {
                sql: format!("DELETE FROM {table}{clause}"),
                kind: OperationKind::Delete,
                placeholders
            })
        }
        Operation::Save => insert(schema, naming).ok_or_else(|| BuildError::EmptySchema {
            method: method()
        }),
        Operation::Update => update(schema, naming, method),
        Operation::Unknown => Err(BuildError::UnknownOperation {
            method: method()
        })
    }
}

/// Render an `existsBy…` method with a specific strategy.
///
/// # Errors
///
/// [`BuildError::NoStatement`] for [`ExistsStrategy::LiteralFalse`].
pub fn build_exists(
    descriptor: &QueryMethodDescriptor,
    schema: &EntitySchema,
    naming: NamingStrategy,
    strategy: ExistsStrategy
) -> Result<SqlStatement, BuildError> {
    let projection = strategy
        .projection()
        .ok_or(BuildError::NoStatement(strategy))?;
    Ok(select(
        format!("SELECT {projection} FROM {}", schema.table_name()),
        descriptor,
        schema,
        naming
    ))
}

/// ` WHERE …` for `conditions`, or an empty string when there are none.
///
/// Columns come from [`EntitySchema::column`], so fields with an explicit
/// column keep it.
pub fn where_clause(
    conditions: &[Condition],
    schema: &EntitySchema,
    naming: NamingStrategy
) -> (String, Vec<PlaceholderSource>) {
    let mut sql = String::new();
    let mut placeholders = Vec::new();

    for (index, condition) in conditions.iter().enumerate() {
        if index == 0 {
            sql.push_str(" WHERE ");
        } else {
            sql.push_str(&format!(" {} ", condition.connector.sql_token()));
        }

        let column = schema.column(&condition.field, naming);
        let op = condition.operator;
        match op {
            Operator::IsNull | Operator::IsNotNull => {
                sql.push_str(&format!("{column} {}", op.sql_token()));
            }
            Operator::Between | Operator::NotBetween => {
                sql.push_str(&format!("{column} {} ? AND ?", op.sql_token()));
            }
            Operator::In | Operator::NotIn => {
                sql.push_str(&format!("{column} {} (?)", op.sql_token()));
            }
            _ => sql.push_str(&format!("{column} {} ?", op.sql_token()))
        }

        for _ in 0..op.placeholder_count() {
            placeholders.push(PlaceholderSource::Condition {
                index,
                field: condition.field.clone()
            });
        }
    }

    (sql, placeholders)
}

fn select(
    head: String,
    descriptor: &QueryMethodDescriptor,
    schema: &EntitySchema,
    naming: NamingStrategy
) -> SqlStatement {
    let (clause, placeholders) = where_clause(&descriptor.conditions, schema, naming);
    SqlStatement {
        sql: head + &clause,
        kind: OperationKind::Select,
        placeholders
    }
}

fn insert(schema: &EntitySchema, naming: NamingStrategy) -> Option<SqlStatement> {
    if schema.is_empty() {
        return None;
    }

    let columns: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| schema.column(f, naming))
        .collect();
    let markers = vec!["?"; columns.len()].join(", ");

    Some(SqlStatement {
        sql:          format!(
            "INSERT INTO {} ({}) VALUES ({markers})",
            schema.table_name(),
            columns.join(", ")
        ),
        kind:         OperationKind::Insert,
        placeholders: schema
            .fields()
            .iter()
            .cloned()
            .map(PlaceholderSource::Field)
            .collect()
    })
}

fn update(
    schema: &EntitySchema,
    naming: NamingStrategy,
    method: impl Fn() -> String
) -> Result<SqlStatement, BuildError> {
    if schema.is_empty() {
        return Err(BuildError::EmptySchema {
            method: method()
        });
    }

    let set_fields: Vec<&str> = schema.non_key_fields().collect();
    if set_fields.is_empty() {
        return Err(BuildError::NothingToSet {
            method: method()
        });
    }

    let assignments: Vec<String> = set_fields
        .iter()
        .map(|f| format!("{} = ?", schema.column(f, naming)))
        .collect();
    let mut sql = format!("UPDATE {} SET {}", schema.table_name(), assignments.join(", "));
    let mut placeholders: Vec<PlaceholderSource> = set_fields
        .iter()
        .map(|f| PlaceholderSource::Field((*f).to_string()))
        .collect();

    if let Some(pk) = schema.primary_key() {
        sql.push_str(&format!(" WHERE {} = ?", schema.column(pk, naming)));
        placeholders.push(PlaceholderSource::Field(pk.to_string()));
    }

    Ok(SqlStatement {
        sql,
        kind: OperationKind::Update,
        placeholders
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::intent::parse;

    fn users() -> EntitySchema {
        EntitySchema::new("users", ["id", "name", "email", "active"])
    }

    fn sql(method: &str) -> String {
        build(&parse(method), &users(), NamingStrategy::SnakeCase)
            .map(|s| s.sql)
            .unwrap_or_else(|e| panic!("{method}: {e}"))
    }

    #[test]
    fn find_by_active_and_email() {
        assert_eq!(
            sql("findByActiveAndEmail"),
            "SELECT * FROM users WHERE active = ? AND email = ?"
        );
    }

    #[test]
    fn find_all_without_conditions() {
        assert_eq!(sql("findAll"), "SELECT * FROM users");
    }

    #[test]
    fn count_and_delete() {
        assert_eq!(sql("countByActive"), "SELECT COUNT(*) FROM users WHERE active = ?");
        assert_eq!(sql("deleteByEmail"), "DELETE FROM users WHERE email = ?");
        assert_eq!(
            build(&parse("deleteByEmail"), &users(), NamingStrategy::SnakeCase)
                .unwrap()
                .kind,
            OperationKind::Delete
        );
    }

    #[test]
    fn or_connector_renders_or() {
        assert_eq!(
            sql("findByNameOrEmail"),
            "SELECT * FROM users WHERE name = ? OR email = ?"
        );
    }

    #[test]
    fn special_operators() {
        assert_eq!(
            sql("findByNameIsNullAndEmailIsNotNull"),
            "SELECT * FROM users WHERE name IS NULL AND email IS NOT NULL"
        );
        assert_eq!(
            sql("findByIdBetween"),
            "SELECT * FROM users WHERE id BETWEEN ? AND ?"
        );
        assert_eq!(
            sql("findByIdNotBetween"),
            "SELECT * FROM users WHERE id NOT BETWEEN ? AND ?"
        );
        assert_eq!(sql("findByIdIn"), "SELECT * FROM users WHERE id IN (?)");
        assert_eq!(sql("findByIdNotIn"), "SELECT * FROM users WHERE id NOT IN (?)");
        assert_eq!(
            sql("findByNameContaining"),
            "SELECT * FROM users WHERE name LIKE ?"
        );
        assert_eq!(
            sql("findByNameNotContaining"),
            "SELECT * FROM users WHERE name NOT LIKE ?"
        );
        assert_eq!(sql("findByIdGreaterThanEqual"), "SELECT * FROM users WHERE id >= ?");
        assert_eq!(sql("findByIdNotEqual"), "SELECT * FROM users WHERE id != ?");
    }

    #[test]
    fn placeholder_count_matches_operator_for_every_operator() {
        for op in Operator::ALL {
            let d = parse(&format!("findByName{}", op.keyword()));
            let stmt = build(&d, &users(), NamingStrategy::SnakeCase).unwrap();
            let markers = stmt.sql.matches('?').count();
            assert_eq!(markers, op.placeholder_count(), "{op}");
            assert_eq!(stmt.placeholder_count(), markers, "{op}");
        }
    }

    #[test]
    fn between_sources_point_at_one_condition() {
        let stmt = build(
            &parse("findByNameAndIdBetween"),
            &users(),
            NamingStrategy::SnakeCase
        )
        .unwrap();
        let indices: Vec<usize> = stmt
            .placeholders
            .iter()
            .map(|p| match p {
                PlaceholderSource::Condition {
                    index, ..
                } => *index,
                PlaceholderSource::Field(_) => usize::MAX
            })
            .collect();
        assert_eq!(indices, [0, 1, 1]);
    }

    #[test]
    fn exists_strategies() {
        let d = parse("existsByEmail");
        let schema = users();
        let naming = NamingStrategy::SnakeCase;

        assert_eq!(
            build(&d, &schema, naming).unwrap().sql,
            "SELECT CASE WHEN COUNT(*) > 0 THEN TRUE ELSE FALSE END FROM users WHERE email = ?"
        );
        assert_eq!(
            build_exists(&d, &schema, naming, ExistsStrategy::CountComparison)
                .unwrap()
                .sql,
            "SELECT COUNT(*) FROM users WHERE email = ?"
        );
        assert_eq!(
            build_exists(&d, &schema, naming, ExistsStrategy::LiteralFalse),
            Err(BuildError::NoStatement(ExistsStrategy::LiteralFalse))
        );
        assert_eq!(ExistsStrategy::CHAIN[0], ExistsStrategy::BooleanCase);
        assert_eq!(ExistsStrategy::CHAIN[2], ExistsStrategy::LiteralFalse);
    }

    #[test]
    fn save_uses_declaration_order() {
        let schema = EntitySchema::new("users", ["id", "firstName", "email"]);
        let stmt = build(&parse("save"), &schema, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (id, first_name, email) VALUES (?, ?, ?)"
        );
        assert_eq!(stmt.kind, OperationKind::Insert);
        assert_eq!(
            stmt.placeholders,
            [
                PlaceholderSource::Field("id".into()),
                PlaceholderSource::Field("firstName".into()),
                PlaceholderSource::Field("email".into())
            ]
        );
    }

    #[test]
    fn update_excludes_key_from_set_and_binds_it_last() {
        let schema = EntitySchema::new("users", ["name", "id", "email"]);
        let stmt = build(&parse("update"), &schema, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(stmt.sql, "UPDATE users SET name = ?, email = ? WHERE id = ?");
        assert_eq!(
            stmt.placeholders.last(),
            Some(&PlaceholderSource::Field("id".into()))
        );
        assert_eq!(stmt.sql.matches("id = ?").count(), 1);
    }

    #[test]
    fn update_without_primary_key_has_no_where() {
        let schema = EntitySchema::new("events", ["kind", "payload"]);
        let stmt = build(&parse("update"), &schema, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(stmt.sql, "UPDATE events SET kind = ?, payload = ?");
    }

    #[test]
    fn naming_strategy_applies_to_columns() {
        let schema = EntitySchema::new("users", ["id", "createdAt"]);
        let d = parse("findByCreatedAtLessThan");
        assert_eq!(
            build(&d, &schema, NamingStrategy::CamelCase).unwrap().sql,
            "SELECT * FROM users WHERE createdAt < ?"
        );
        assert_eq!(
            build(&d, &schema, NamingStrategy::PascalCase).unwrap().sql,
            "SELECT * FROM users WHERE CreatedAt < ?"
        );
    }

    #[test]
    fn explicit_columns_keep_digit_boundaries() {
        let schema = EntitySchema::new("addresses", ["id", "address1Line", "zip"])
            .with_column("address1Line", "address1_line");
        let naming = NamingStrategy::SnakeCase;
        assert_eq!(
            build(&parse("findByAddress1Line"), &schema, naming).unwrap().sql,
            "SELECT * FROM addresses WHERE address1_line = ?"
        );
        assert_eq!(
            build(&parse("save"), &schema, naming).unwrap().sql,
            "INSERT INTO addresses (id, address1_line, zip) VALUES (?, ?, ?)"
        );
        assert_eq!(
            build(&parse("update"), &schema, naming).unwrap().sql,
            "UPDATE addresses SET address1_line = ?, zip = ? WHERE id = ?"
        );
    }

    #[test]
    fn per_method_errors() {
        let empty = EntitySchema::new("t", Vec::<String>::new());
        let naming = NamingStrategy::SnakeCase;
        assert!(matches!(
            build(&parse("save"), &empty, naming),
            Err(BuildError::EmptySchema { .. })
        ));
        assert!(matches!(
            build(&parse("update"), &empty, naming),
            Err(BuildError::EmptySchema { .. })
        ));
        assert!(matches!(
            build(&parse("update"), &EntitySchema::new("t", ["id"]), naming),
            Err(BuildError::NothingToSet { .. })
        ));
        assert!(matches!(
            build(&parse("frobnicate"), &users(), naming),
            Err(BuildError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn building_twice_is_identical() {
        let d = parse("findByNameAndIdBetween");
        let schema = users();
        assert_eq!(
            build(&d, &schema, NamingStrategy::SnakeCase),
            build(&d, &schema, NamingStrategy::SnakeCase)
        );
    }
}
