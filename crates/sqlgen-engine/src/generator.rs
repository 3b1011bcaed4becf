// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation pipeline.
//!
//! [`Generator`] wires the stages together for one `impl` block:
//!
//! ```text
//! MethodSignature ─┬─ NativeQuery? ─► raw::analyze ──────────┐
//!                  └─ intent::parse ─► statement::build ─────┼─► binding ─► mapping ─► plan ─► CodeEmitter
//!                                                            │
//!                    ClassContext (schema, naming) ──────────┘
//! ```
//!
//! Each method is planned and emitted on its own. A failure in one method is
//! recorded in its [`Outcome`] and never affects the others.
//!
//! # Outcomes
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | Planned and emitted cleanly | [`Outcome::Ok`] |
//! | Emitted with advisory issues | [`Outcome::Warning`] |
//! | No convention applies, empty body | [`Outcome::Unsupported`] with a placeholder body |
//! | Planning or every emission stage failed | [`Outcome::Fallback`] |
//! | Method already has a body | [`Outcome::Skipped`] |

use tracing::{debug, warn};

use crate::{
    binding::{self, DeclaredParameter},
    emitter::{CodeEmitter, ScalarCast},
    intent::{self, Operation},
    issue::Issue,
    mapping::{self, MappingStrategy, RowMapping, TypeRef},
    naming::NamingStrategy,
    plan::{Cardinality, OperationKind, ParameterStyle, QueryExecutionPlan},
    raw,
    schema::EntitySchema,
    statement::{self, ExistsStrategy}
};

/// Per-`impl` generation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassContext {
    /// Entity schema; `None` for classes without an entity.
    pub schema:      Option<EntitySchema>,
    /// Column naming.
    pub naming:      NamingStrategy,
    /// Only `#[native_query]` methods are generated.
    pub native_only: bool,
    /// Issues are errors instead of warnings.
    pub strict:      bool
}

impl ClassContext {
    /// Context for `schema` under `naming`.
    pub fn new(schema: Option<EntitySchema>, naming: NamingStrategy) -> Self {
        Self {
            schema,
            naming,
            native_only: false,
            strict: false
        }
    }
}

/// Compiler-independent view of a method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Camel-cased method name.
    pub name:     String,
    /// Parameters after the receiver.
    pub params:   Vec<DeclaredParameter>,
    /// Success type of the method.
    pub returns:  TypeRef,
    /// The method carries its own implementation.
    pub has_body: bool
}

/// Hand-written SQL attached to a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeQuery {
    /// SQL text.
    pub sql:            String,
    /// Row type decoded before converting into the declared element.
    pub result_type:    Option<TypeRef>,
    /// Mapping strategy.
    pub mapping:        MappingStrategy,
    /// `(column, property)` pairs.
    pub column_mapping: Vec<(String, String)>,
    /// Treat as a mutation regardless of the leading keyword.
    pub is_update:      bool,
    /// Explicit parameter style; detected from the SQL when absent.
    pub parameter_type: Option<ParameterStyle>,
    /// Check parameters against placeholders.
    pub validate_sql:   bool
}

impl NativeQuery {
    /// Query with default options.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql:            sql.into(),
            result_type:    None,
            mapping:        MappingStrategy::Auto,
            column_mapping: Vec::new(),
            is_update:      false,
            parameter_type: None,
            validate_sql:   true
        }
    }
}

/// Tagged result of planning or generating one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Clean result.
    Ok(T),
    /// Result produced despite advisory issues.
    Warning(T, Vec<Issue>),
    /// No convention applies. `body` holds the emitter's placeholder once
    /// generated.
    Unsupported {
        /// Method name.
        method: String,
        /// Why.
        issues: Vec<Issue>,
        /// Placeholder body.
        body:   Option<T>
    },
    /// The method keeps its original body.
    Fallback {
        /// Method name.
        method: String,
        /// Why.
        issues: Vec<Issue>
    },
    /// Not a generated method.
    Skipped {
        /// Method name.
        method: String
    }
}

impl<T> Outcome<T> {
    fn with_issues(value: T, issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            Self::Ok(value)
        } else {
            Self::Warning(value, issues)
        }
    }

    /// Produced value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(v)
            | Self::Warning(v, _)
            | Self::Unsupported {
                body: Some(v), ..
            } => Some(v),
            _ => None
        }
    }

    /// Take the produced value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ok(v)
            | Self::Warning(v, _)
            | Self::Unsupported {
                body: Some(v), ..
            } => Some(v),
            _ => None
        }
    }

    /// Advisory issues.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Warning(_, issues)
            | Self::Unsupported {
                issues, ..
            }
            | Self::Fallback {
                issues, ..
            } => issues,
            Self::Ok(_)
            | Self::Skipped {
                ..
            } => &[]
        }
    }
}

/// Stateless pipeline over a [`ClassContext`].
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    ctx: &'a ClassContext
}

impl<'a> Generator<'a> {
    /// Generator for `ctx`.
    pub const fn new(ctx: &'a ClassContext) -> Self {
        Self {
            ctx
        }
    }

    /// Plan a convention method.
    pub fn plan_derived(&self, sig: &MethodSignature) -> Outcome<QueryExecutionPlan> {
        if sig.has_body {
            return Outcome::Skipped {
                method: sig.name.clone()
            };
        }

        let descriptor = intent::parse(&sig.name);
        let schema = match (&self.ctx.schema, descriptor.operation) {
            (_, Operation::Unknown) | (None, _) => return unsupported(&sig.name),
            (Some(_), _) if self.ctx.native_only => return unsupported(&sig.name),
            (Some(schema), _) => schema
        };

        let mut issues: Vec<Issue> = descriptor
            .fields()
            .filter(|f| !schema.has_field(f))
            .map(|f| Issue::UnknownField {
                method: sig.name.clone(),
                field:  f.to_string()
            })
            .collect();

        let stmt = match statement::build(&descriptor, schema, self.ctx.naming) {
            Ok(stmt) => stmt,
            Err(err) => {
                issues.push(Issue::EmissionFailed {
                    method: sig.name.clone(),
                    stage:  "statement".into(),
                    reason: err.to_string()
                });
                return fallback(&sig.name, issues);
            }
        };

        let (bindings, binding_issues) = match descriptor.operation {
            Operation::Save | Operation::Update => {
                match binding::plan_entity(&sig.name, &stmt, &sig.params) {
                    Ok(planned) => planned,
                    Err(issue) => {
                        issues.push(issue);
                        return fallback(&sig.name, issues);
                    }
                }
            }
            _ => binding::plan_derived(&sig.name, &stmt, &sig.params)
        };
        issues.extend(binding_issues);

        let resolution = mapping::resolve(
            &sig.name,
            &sig.returns,
            MappingStrategy::Auto,
            Vec::new(),
            None
        );
        issues.extend(resolution.issues);

        let plan = QueryExecutionPlan {
            method: sig.name.clone(),
            sql: stmt.sql,
            operation_kind: stmt.kind,
            style: ParameterStyle::Positional,
            bindings,
            mapping: resolution.plan,
            cardinality: resolution.cardinality
        };
        debug!(method = %plan.method, sql = %plan.sql, cardinality = %plan.cardinality, "planned derived query");
        Outcome::with_issues(plan, issues)
    }

    /// Plan a method carrying hand-written SQL.
    pub fn plan_native(&self, sig: &MethodSignature, query: &NativeQuery) -> Outcome<QueryExecutionPlan> {
        let analyzed = raw::analyze(&query.sql);
        let operation_kind = match (query.is_update, analyzed.kind) {
            (true, OperationKind::Select) => OperationKind::Update,
            (_, kind) => kind
        };
        let style = query
            .parameter_type
            .unwrap_or_else(|| analyzed.detected_style());

        let bindings = binding::classify(&sig.params);
        let mut issues = Vec::new();
        if query.validate_sql {
            issues.extend(match style {
                ParameterStyle::Named => binding::validate_named(&sig.name, &analyzed.named, &bindings),
                ParameterStyle::Positional => {
                    binding::validate_positional(&sig.name, analyzed.positional, &bindings)
                }
            });
        }

        let resolution = mapping::resolve(
            &sig.name,
            &sig.returns,
            query.mapping,
            query.column_mapping.clone(),
            query.result_type.clone()
        );
        issues.extend(resolution.issues);

        let plan = QueryExecutionPlan {
            method: sig.name.clone(),
            sql: analyzed.sql,
            operation_kind,
            style,
            bindings,
            mapping: resolution.plan,
            cardinality: resolution.cardinality
        };
        debug!(method = %plan.method, sql = %plan.sql, style = ?plan.style, "planned native query");
        Outcome::with_issues(plan, issues)
    }

    /// Plan and emit one method.
    pub fn generate<E: CodeEmitter>(
        &self,
        sig: &MethodSignature,
        native: Option<&NativeQuery>,
        emitter: &mut E
    ) -> Outcome<E::Output> {
        let planned = match native {
            Some(query) => self.plan_native(sig, query),
            None => self.plan_derived(sig)
        };

        let (plan, mut issues) = match planned {
            Outcome::Ok(plan) => (plan, Vec::new()),
            Outcome::Warning(plan, issues) => (plan, issues),
            Outcome::Unsupported {
                method,
                mut issues,
                ..
            } => {
                let cardinality = mapping::resolve(&method, &sig.returns, MappingStrategy::Auto, Vec::new(), None)
                    .cardinality;
                let outcome = match emitter.emit_placeholder(&method, cardinality) {
                    Ok(body) => Outcome::Unsupported {
                        method,
                        issues,
                        body: Some(body)
                    },
                    Err(err) => {
                        issues.push(Issue::EmissionFailed {
                            method: method.clone(),
                            stage:  "placeholder".into(),
                            reason: err.to_string()
                        });
                        Outcome::Fallback {
                            method,
                            issues
                        }
                    }
                };
                return report(outcome);
            }
            Outcome::Fallback {
                method,
                issues
            } => {
                return report(Outcome::Fallback {
                    method,
                    issues
                });
            }
            Outcome::Skipped {
                method
            } => {
                return Outcome::Skipped {
                    method
                };
            }
        };

        let exists = native.is_none() && intent::parse(&sig.name).operation == Operation::Exists;
        let emitted = if exists {
            self.emit_exists(plan, &mut issues, emitter)
        } else {
            let counts = native.is_none() && intent::parse(&sig.name).operation == Operation::Count;
            emit_plan(&plan, counts, emitter).map_err(|err| {
                issues.push(Issue::EmissionFailed {
                    method: plan.method.clone(),
                    stage:  "emit".into(),
                    reason: err.to_string()
                });
            })
        };

        report(match emitted {
            Ok(body) => Outcome::with_issues(body, issues),
            Err(()) => Outcome::Fallback {
                method: sig.name.clone(),
                issues
            }
        })
    }

    /// Generate every method independently, in order.
    pub fn generate_class<'m, E: CodeEmitter>(
        &self,
        methods: impl IntoIterator<Item = (&'m MethodSignature, Option<&'m NativeQuery>)>,
        emitter: &mut E
    ) -> Vec<Outcome<E::Output>> {
        methods
            .into_iter()
            .map(|(sig, native)| self.generate(sig, native, emitter))
            .collect()
    }

    /// Walk [`ExistsStrategy::CHAIN`] until one strategy emits.
    fn emit_exists<E: CodeEmitter>(
        &self,
        mut plan: QueryExecutionPlan,
        issues: &mut Vec<Issue>,
        emitter: &mut E
    ) -> Result<E::Output, ()> {
        let descriptor = intent::parse(&plan.method);

        for strategy in ExistsStrategy::CHAIN {
            let attempt = match strategy {
                ExistsStrategy::LiteralFalse => {
                    plan.sql.clear();
                    plan.bindings.clear();
                    emitter
                        .emit_constant(false)
                        .and_then(|body| emitter.finish(body, &plan))
                }
                ExistsStrategy::BooleanCase | ExistsStrategy::CountComparison => {
                    if let Some(schema) = &self.ctx.schema
                        && let Ok(stmt) =
                            statement::build_exists(&descriptor, schema, self.ctx.naming, strategy)
                    {
                        plan.sql = stmt.sql;
                    }
                    emit_plan(&plan, strategy == ExistsStrategy::CountComparison, emitter)
                }
            };

            match attempt {
                Ok(body) => {
                    debug!(method = %plan.method, ?strategy, "exists strategy selected");
                    return Ok(body);
                }
                Err(err) => issues.push(Issue::EmissionFailed {
                    method: plan.method.clone(),
                    stage:  format!("exists {strategy:?}"),
                    reason: err.to_string()
                })
            }
        }

        Err(())
    }
}

/// Compose a body per the cardinality table in [`crate::emitter`].
fn emit_plan<E: CodeEmitter>(
    plan: &QueryExecutionPlan,
    counts: bool,
    emitter: &mut E
) -> Result<E::Output, E::Error> {
    let scalar = matches!(plan.cardinality, Cardinality::Scalar | Cardinality::Boolean);
    let mutation_result = plan.operation_kind.is_mutation() && (scalar || plan.cardinality == Cardinality::Void);

    let value = if plan.cardinality == Cardinality::Void || mutation_result {
        let fetched = emitter.emit_update(plan)?;
        if scalar {
            emitter.emit_scalar_cast(fetched, scalar_cast(plan, true), plan)?
        } else {
            fetched
        }
    } else {
        let fetched = emitter.emit_select(plan)?;
        if scalar {
            emitter.emit_scalar_cast(fetched, scalar_cast(plan, counts), plan)?
        } else {
            emitter.emit_mapping(fetched, plan)?
        }
    };

    emitter.finish(value, plan)
}

fn scalar_cast(plan: &QueryExecutionPlan, counts: bool) -> ScalarCast {
    match (plan.cardinality, plan.mapping.row) {
        (Cardinality::Boolean, _) if counts => ScalarCast::CountToBool,
        (_, RowMapping::Scalar(kind)) => ScalarCast::To(kind),
        _ => ScalarCast::To(crate::ScalarKind::Long)
    }
}

fn unsupported<T>(method: &str) -> Outcome<T> {
    Outcome::Unsupported {
        method: method.to_string(),
        issues: vec![Issue::UnsupportedMethodPattern {
            method: method.to_string()
        }],
        body:   None
    }
}

fn fallback<T>(method: &str, issues: Vec<Issue>) -> Outcome<T> {
    Outcome::Fallback {
        method: method.to_string(),
        issues
    }
}

fn report<T>(outcome: Outcome<T>) -> Outcome<T> {
    for issue in outcome.issues() {
        warn!(method = issue.method(), code = issue.code(), "{issue}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{emitter::trace::TraceEmitter, mapping::ScalarKind};

    fn ctx() -> ClassContext {
        ClassContext::new(
            Some(EntitySchema::new("users", ["id", "name", "email", "active"])),
            NamingStrategy::SnakeCase
        )
    }

    fn text(name: &str) -> DeclaredParameter {
        DeclaredParameter::new(name, TypeRef::Scalar(ScalarKind::Text, "String".into()))
    }

    fn sig(name: &str, params: Vec<DeclaredParameter>, returns: TypeRef) -> MethodSignature {
        MethodSignature {
            name: name.into(),
            params,
            returns,
            has_body: false
        }
    }

    fn users() -> TypeRef {
        TypeRef::sequence(TypeRef::named("User"))
    }

    fn boolean() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Bool, "bool".into())
    }

    #[test]
    fn derived_find_plan() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).plan_derived(&sig(
            "findByActiveAndEmail",
            vec![DeclaredParameter::new("active", boolean()), text("email")],
            users()
        ));
        let Outcome::Ok(plan) = outcome else {
            panic!("expected clean plan, got {outcome:?}");
        };
        assert_eq!(plan.sql, "SELECT * FROM users WHERE active = ? AND email = ?");
        assert_eq!(plan.cardinality, Cardinality::List);
        assert_eq!(plan.style, ParameterStyle::Positional);
        assert_eq!(plan.bindings.len(), 2);
        assert_eq!(plan.operation_kind, OperationKind::Select);
    }

    #[test]
    fn unknown_fields_are_advisory() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).plan_derived(&sig("findByNickname", vec![text("n")], users()));
        let Outcome::Warning(plan, issues) = outcome else {
            panic!("expected warning");
        };
        assert_eq!(plan.sql, "SELECT * FROM users WHERE nickname = ?");
        assert!(matches!(issues[..], [Issue::UnknownField { .. }]));
    }

    #[test]
    fn parameter_count_mismatch_is_advisory() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).plan_derived(&sig("findByName", vec![], users()));
        assert!(matches!(
            outcome.issues(),
            [Issue::ParameterCountMismatch {
                expected: 1,
                found: 0,
                ..
            }]
        ));
        assert!(outcome.value().is_some());
    }

    #[test]
    fn helpers_with_bodies_are_skipped() {
        let ctx = ctx();
        let mut s = sig("fetchEverything", vec![], users());
        s.has_body = true;
        assert!(matches!(
            Generator::new(&ctx).plan_derived(&s),
            Outcome::Skipped { .. }
        ));
    }

    #[test]
    fn unknown_method_without_body_gets_placeholder() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).generate(
            &sig("fetchEverything", vec![], users()),
            None,
            &mut TraceEmitter::default()
        );
        let Outcome::Unsupported {
            body, issues, ..
        } = outcome
        else {
            panic!("expected unsupported");
        };
        assert_eq!(body.as_deref(), Some("placeholder[list](fetchEverything)"));
        assert!(matches!(issues[..], [Issue::UnsupportedMethodPattern { .. }]));
    }

    #[test]
    fn native_only_classes_skip_derived_methods() {
        let mut ctx = ctx();
        ctx.native_only = true;
        assert!(matches!(
            Generator::new(&ctx).plan_derived(&sig("findByName", vec![text("n")], users())),
            Outcome::Unsupported { .. }
        ));

        let no_entity = ClassContext::new(None, NamingStrategy::SnakeCase);
        assert!(matches!(
            Generator::new(&no_entity).plan_derived(&sig("findByName", vec![text("n")], users())),
            Outcome::Unsupported { .. }
        ));
    }

    #[test]
    fn generates_select_bodies() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let mut emitter = TraceEmitter::default();

        let list = generator.generate(&sig("findByName", vec![text("n")], users()), None, &mut emitter);
        assert_eq!(
            list,
            Outcome::Ok("ok(map[Bean](select[list](SELECT * FROM users WHERE name = ?)))".into())
        );

        let count = generator.generate(
            &sig(
                "countByActive",
                vec![DeclaredParameter::new("a", boolean())],
                TypeRef::Scalar(ScalarKind::Long, "i64".into())
            ),
            None,
            &mut emitter
        );
        assert_eq!(
            count.value().map(String::as_str),
            Some("ok(To(Long)(select[scalar](SELECT COUNT(*) FROM users WHERE active = ?)))")
        );
    }

    #[test]
    fn exists_uses_boolean_case_first() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).generate(
            &sig("existsByEmail", vec![text("e")], boolean()),
            None,
            &mut TraceEmitter::default()
        );
        assert_eq!(
            outcome,
            Outcome::Ok(
                "ok(To(Bool)(select[boolean](SELECT CASE WHEN COUNT(*) > 0 THEN TRUE ELSE FALSE END FROM users WHERE email = ?)))"
                    .into()
            )
        );
    }

    #[test]
    fn exists_falls_back_to_count_comparison() {
        let ctx = ctx();
        let outcome = Generator::new(&ctx).generate(
            &sig("existsByEmail", vec![text("e")], boolean()),
            None,
            &mut TraceEmitter::refusing("CASE WHEN")
        );
        let Outcome::Warning(body, issues) = outcome else {
            panic!("expected warning");
        };
        assert_eq!(
            body,
            "ok(CountToBool(select[boolean](SELECT COUNT(*) FROM users WHERE email = ?)))"
        );
        assert!(matches!(issues[..], [Issue::EmissionFailed { .. }]));
    }

    #[test]
    fn exists_ends_with_literal_false() {
        let ctx = ctx();
        let mut emitter = TraceEmitter::refusing("FROM users");
        let outcome = Generator::new(&ctx).generate(
            &sig("existsByEmail", vec![text("e")], boolean()),
            None,
            &mut emitter
        );
        let Outcome::Warning(body, issues) = outcome else {
            panic!("expected warning");
        };
        assert_eq!(body, "ok(false)");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn emission_failure_falls_back_without_touching_siblings() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let mut emitter = TraceEmitter {
            refuse_mapping: true,
            ..TraceEmitter::default()
        };
        let find = sig("findByName", vec![text("n")], users());
        let count = sig(
            "countByName",
            vec![text("n")],
            TypeRef::Scalar(ScalarKind::Long, "i64".into())
        );

        let outcomes = generator.generate_class([(&find, None), (&count, None)], &mut emitter);
        assert!(matches!(outcomes[0], Outcome::Fallback { .. }));
        assert!(matches!(outcomes[1], Outcome::Ok(_)));
    }

    #[test]
    fn save_and_update_bind_entity_fields() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let entity = vec![DeclaredParameter::new("user", TypeRef::named("User"))];

        let Outcome::Ok(save) = generator.plan_derived(&sig("save", entity.clone(), TypeRef::Unit)) else {
            panic!("save");
        };
        assert_eq!(
            save.sql,
            "INSERT INTO users (id, name, email, active) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(save.cardinality, Cardinality::Void);
        assert_eq!(save.operation_kind, OperationKind::Insert);

        let Outcome::Ok(update) = generator.plan_derived(&sig(
            "update",
            entity,
            TypeRef::Scalar(ScalarKind::Long, "u64".into())
        )) else {
            panic!("update");
        };
        assert_eq!(update.sql, "UPDATE users SET name = ?, email = ?, active = ? WHERE id = ?");
        let bound: Vec<_> = update.bindings.iter().map(|b| b.binding_name.as_str()).collect();
        assert_eq!(bound, ["name", "email", "active", "id"]);

        let body = generator.generate(
            &sig("save", vec![DeclaredParameter::new("u", TypeRef::named("User"))], TypeRef::Unit),
            None,
            &mut TraceEmitter::default()
        );
        assert_eq!(
            body.value().map(String::as_str),
            Some("ok(update(INSERT INTO users (id, name, email, active) VALUES (?, ?, ?, ?)))")
        );
    }

    #[test]
    fn save_without_entity_falls_back() {
        let ctx = ctx();
        assert!(matches!(
            Generator::new(&ctx).plan_derived(&sig("save", vec![], TypeRef::Unit)),
            Outcome::Fallback { .. }
        ));
    }

    #[test]
    fn native_named_query() {
        let ctx = ctx();
        let query = NativeQuery::new("SELECT * FROM users WHERE name = :name AND email = :mail");
        let outcome = Generator::new(&ctx).plan_native(
            &sig("search", vec![text("name"), text("email").renamed("mail")], users()),
            &query
        );
        let Outcome::Ok(plan) = outcome else {
            panic!("expected clean plan, got {outcome:?}");
        };
        assert_eq!(plan.style, ParameterStyle::Named);
        assert_eq!(plan.bindings[1].binding_name, "mail");
        assert_eq!(plan.cardinality, Cardinality::List);
    }

    #[test]
    fn native_validation_is_advisory_and_optional() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let s = sig("search", vec![text("name")], users());

        let mut query = NativeQuery::new("SELECT * FROM users WHERE name = ? AND email = ?");
        assert!(matches!(
            generator.plan_native(&s, &query).issues(),
            [Issue::ParameterCountMismatch { .. }]
        ));

        query.validate_sql = false;
        assert!(matches!(generator.plan_native(&s, &query), Outcome::Ok(_)));
    }

    #[test]
    fn native_mutations() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let s = sig(
            "deactivate",
            vec![text("email")],
            TypeRef::Scalar(ScalarKind::Long, "u64".into())
        );

        let query = NativeQuery::new("UPDATE users SET active = FALSE WHERE email = ?");
        let body = generator.generate(&s, Some(&query), &mut TraceEmitter::default());
        assert_eq!(
            body.value().map(String::as_str),
            Some("ok(To(Long)(update(UPDATE users SET active = FALSE WHERE email = ?)))")
        );

        let mut forced = NativeQuery::new("CALL deactivate(?)");
        forced.is_update = true;
        let Outcome::Ok(plan) = generator.plan_native(&s, &forced) else {
            panic!("forced");
        };
        assert_eq!(plan.operation_kind, OperationKind::Update);
    }

    #[test]
    fn native_queries_ignore_body_presence() {
        let ctx = ctx();
        let mut s = sig("all", vec![], users());
        s.has_body = true;
        assert!(matches!(
            Generator::new(&ctx).plan_native(&s, &NativeQuery::new("SELECT * FROM users")),
            Outcome::Ok(_)
        ));
    }

    #[test]
    fn issues_are_logged_without_failing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("sqlgen_engine=debug"))
            .with_test_writer()
            .try_init();

        let ctx = ctx();
        let outcome = Generator::new(&ctx).generate(
            &sig("findByNickname", vec![text("n")], users()),
            None,
            &mut TraceEmitter::default()
        );
        assert!(matches!(outcome, Outcome::Warning(..)));
    }

    #[test]
    fn planning_is_idempotent() {
        let ctx = ctx();
        let generator = Generator::new(&ctx);
        let s = sig("findByNameOrEmail", vec![text("a"), text("b")], users());
        assert_eq!(generator.plan_derived(&s), generator.plan_derived(&s));
    }
}
