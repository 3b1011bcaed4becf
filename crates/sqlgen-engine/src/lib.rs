// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query-intent parsing and SQL/plan synthesis for sqlgen.
//!
//! This crate turns convention-named data-access methods
//! (`findByNameAndAgeGreaterThan`) and hand-written SQL into a
//! [`QueryExecutionPlan`]: SQL text, ordered parameter bindings and a result
//! mapping strategy. It knows nothing about the compiler; the code that turns
//! a plan into a method body sits behind the [`CodeEmitter`] trait.
//!
//! # Architecture
//!
//! ```text
//! method name ─► intent ─► QueryMethodDescriptor ─► statement ─┐
//!                                                              ├─► binding ─► mapping ─► QueryExecutionPlan ─► CodeEmitter
//! raw SQL ─────► raw ─────► RawQuery ─────────────────────────┘
//!
//! naming + schema (ClassContext) are threaded through every stage
//! ```
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`naming`] | Field → column and entity → table transforms |
//! | [`schema`] | Entity field list and primary key |
//! | [`intent`] | Method-name grammar |
//! | [`statement`] | SELECT/COUNT/EXISTS/DELETE/INSERT/UPDATE rendering |
//! | [`raw`] | Placeholder extraction for hand-written SQL |
//! | [`binding`] | Parameter ↔ placeholder planning |
//! | [`mapping`] | Result mapping resolution |
//! | [`plan`] | The assembled execution plan |
//! | [`emitter`] | Backend interface |
//! | [`generator`] | Pipeline, fallbacks and per-method isolation |
//! | [`issue`] | Advisory diagnostics |
//!
//! # Example
//!
//! ```rust
//! use sqlgen_engine::{EntitySchema, NamingStrategy, intent, statement};
//!
//! let schema = EntitySchema::new("users", ["id", "name", "email", "active"]);
//! let descriptor = intent::parse("findByActiveAndEmail");
//! let sql = statement::build(&descriptor, &schema, NamingStrategy::SnakeCase).unwrap();
//!
//! assert_eq!(sql.sql, "SELECT * FROM users WHERE active = ? AND email = ?");
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

pub mod binding;
pub mod emitter;
pub mod generator;
pub mod intent;
pub mod issue;
pub mod mapping;
pub mod naming;
pub mod plan;
pub mod raw;
pub mod schema;
pub mod statement;

pub use binding::{BindingSource, DeclaredParameter, ParameterInfo};
pub use emitter::{CodeEmitter, ScalarCast};
pub use generator::{ClassContext, Generator, MethodSignature, NativeQuery, Outcome};
pub use intent::{Condition, Connector, Operation, Operator, QueryMethodDescriptor};
pub use issue::Issue;
pub use mapping::{MappingStrategy, ResultMappingPlan, RowMapping, ScalarKind, TypeRef};
pub use naming::NamingStrategy;
pub use plan::{Cardinality, OperationKind, ParameterStyle, QueryExecutionPlan};
pub use raw::RawQuery;
pub use schema::EntitySchema;
pub use statement::{BuildError, ExistsStrategy, PlaceholderSource, SqlStatement};
