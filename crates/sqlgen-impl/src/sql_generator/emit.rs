// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Token backend for the engine's [`CodeEmitter`].
//!
//! Every generated body builds a `::sqlgen::Statement`, logs it, and runs it
//! on `self.<executor>`:
//!
//! ```rust,ignore
//! async fn find_by_email(&self, email: &str) -> Result<Option<User>, SqlError> {
//!     Ok({
//!         let __statement = ::sqlgen::Statement::positional(
//!             "SELECT * FROM users WHERE email = ?",
//!             vec![::sqlgen::ToSqlValue::to_sql_value(&email)]
//!         );
//!         ::sqlgen::__private::trace("find_by_email", &__statement);
//!         ::sqlgen::SqlExecutor::fetch_optional(&self.executor, &__statement).await?
//!     }
//!     .map(|__row| <User as ::sqlgen::FromRow>::from_row(__row))
//!     .transpose()?)
//! }
//! ```
//!
//! # Executor calls
//!
//! | Cardinality | Call | Decoded with |
//! |-------------|------|--------------|
//! | `List` | `fetch_all` | `FromRow` / `FromSqlValue` per row |
//! | `Optional` | `fetch_optional` | same, inside the `Option` |
//! | `Single` | `fetch_one` | `FromRow` |
//! | `Scalar`, `Boolean` | `fetch_scalar` | `FromSqlValue` |
//! | `Void`, mutations | `execute` | affected rows through `FromSqlValue` |

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use sqlgen_engine::{
    BindingSource, Cardinality, CodeEmitter, ParameterInfo, ParameterStyle, QueryExecutionPlan,
    RowMapping, ScalarCast
};
use syn::{Ident, Path, Type, ext::IdentExt};

use super::signature::ParsedMethod;

/// Emission failure for one method.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The emitter was used before [`TokenEmitter::begin`].
    #[error("no method is being generated")]
    NoMethod,

    /// A binding names a parameter the signature does not declare.
    #[error("parameter `{0}` is not declared")]
    UnknownArgument(String),

    /// A binding reads an entity field missing from `fields(...)`.
    #[error("entity field `{0}` is not listed in `fields(...)`")]
    UnknownEntityField(String),

    /// Rows cannot be mapped without an element type.
    #[error("cannot find the element type of `{0}`")]
    NoElementType(String),

    /// The cardinality has no row mapping.
    #[error("{0} results are not mapped from rows")]
    Unmappable(Cardinality)
}

/// Per-method tokens.
#[derive(Debug)]
pub struct MethodTokens {
    name:      String,
    arguments: Vec<Ident>,
    ok_type:   Type,
    element:   Option<Type>,
    via:       Option<Path>
}

impl MethodTokens {
    /// Tokens for `parsed`, decoding rows through `via` when given.
    pub fn new(parsed: &ParsedMethod, via: Option<Path>) -> Self {
        Self {
            name: parsed.rust_name.clone(),
            arguments: parsed.arguments.clone(),
            ok_type: parsed.ok_type.clone(),
            element: parsed.element.clone(),
            via
        }
    }
}

/// [`CodeEmitter`] producing method bodies as token streams.
#[derive(Debug)]
pub struct TokenEmitter {
    executor: Ident,
    fields:   HashMap<String, Ident>,
    method:   Option<MethodTokens>
}

impl TokenEmitter {
    /// Emitter executing through `self.<executor>`, reading entity fields by
    /// their engine names.
    pub fn new(executor: Ident, fields: impl IntoIterator<Item = (String, Ident)>) -> Self {
        Self {
            executor,
            fields: fields.into_iter().collect(),
            method: None
        }
    }

    /// Switch to the next method.
    pub fn begin(&mut self, method: MethodTokens) {
        self.method = Some(method);
    }

    fn method(&self) -> Result<&MethodTokens, EmitError> {
        self.method.as_ref().ok_or(EmitError::NoMethod)
    }

    fn argument(&self, declared: &str) -> Result<&Ident, EmitError> {
        self.method()?
            .arguments
            .iter()
            .find(|arg| arg.unraw() == declared)
            .ok_or_else(|| EmitError::UnknownArgument(declared.to_string()))
    }

    fn value(&self, binding: &ParameterInfo) -> Result<TokenStream, EmitError> {
        let argument = self.argument(&binding.declared_name)?;
        let source = match &binding.source {
            BindingSource::Argument => quote!(#argument),
            BindingSource::Field {
                field
            } => {
                let field = self
                    .fields
                    .get(field)
                    .ok_or_else(|| EmitError::UnknownEntityField(field.clone()))?;
                quote!(#argument.#field)
            }
        };
        Ok(quote!(::sqlgen::ToSqlValue::to_sql_value(&#source)))
    }

    fn statement(&self, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        let sql = &plan.sql;
        let values = plan
            .bindings
            .iter()
            .map(|binding| self.value(binding))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match plan.style {
            ParameterStyle::Positional => quote! {
                ::sqlgen::Statement::positional(#sql, ::std::vec![#(#values),*])
            },
            ParameterStyle::Named => {
                let names = plan.bindings.iter().map(|b| &b.binding_name);
                quote! {
                    ::sqlgen::Statement::named(
                        #sql,
                        ::std::vec![#((::std::string::String::from(#names), #values)),*]
                    )
                }
            }
        })
    }

    fn run(&self, plan: &QueryExecutionPlan, call: &str) -> Result<TokenStream, EmitError> {
        let statement = self.statement(plan)?;
        let name = &self.method()?.name;
        let executor = &self.executor;
        let call = Ident::new(call, proc_macro2::Span::call_site());
        Ok(quote! {{
            let __statement = #statement;
            ::sqlgen::__private::trace(#name, &__statement);
            ::sqlgen::SqlExecutor::#call(&self.#executor, &__statement).await?
        }})
    }

    /// Type one row decodes to.
    fn element(&self, plan: &QueryExecutionPlan) -> Result<&Type, EmitError> {
        let method = self.method()?;
        match plan.cardinality {
            Cardinality::List | Cardinality::Optional => method
                .element
                .as_ref()
                .ok_or_else(|| EmitError::NoElementType(method.ok_type.to_token_stream().to_string())),
            _ => Ok(&method.ok_type)
        }
    }

    /// `Result<element, SqlError>` expression decoding `__row`.
    fn decode(&self, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        let element = self.element(plan)?;
        let mapping = &plan.mapping;
        let row = if mapping.row == RowMapping::Remapped && !mapping.column_mapping.is_empty() {
            let pairs = mapping
                .column_mapping
                .iter()
                .map(|(column, property)| quote!((#column, #property)));
            quote!(__row.remap(&[#(#pairs),*]))
        } else {
            quote!(__row)
        };

        Ok(match (mapping.row, &mapping.via, &self.method()?.via) {
            (RowMapping::None, ..) => return Err(EmitError::Unmappable(plan.cardinality)),
            (RowMapping::Scalar(_), ..) => quote! {
                #row.into_first().and_then(<#element as ::sqlgen::FromSqlValue>::from_sql_value)
            },
            (_, Some(_), Some(via)) => quote! {
                <#via as ::sqlgen::FromRow>::from_row(#row).map(::core::convert::Into::<#element>::into)
            },
            _ => quote! {
                <#element as ::sqlgen::FromRow>::from_row(#row)
            }
        })
    }
}

impl CodeEmitter for TokenEmitter {
    type Output = TokenStream;
    type Error = EmitError;

    fn emit_select(&mut self, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        let call = match plan.cardinality {
            Cardinality::List => "fetch_all",
            Cardinality::Optional => "fetch_optional",
            Cardinality::Single => "fetch_one",
            Cardinality::Scalar | Cardinality::Boolean => "fetch_scalar",
            Cardinality::Void => "execute"
        };
        self.run(plan, call)
    }

    fn emit_update(&mut self, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        self.run(plan, "execute")
    }

    fn emit_scalar_cast(
        &mut self,
        fetched: TokenStream,
        cast: ScalarCast,
        plan: &QueryExecutionPlan
    ) -> Result<TokenStream, EmitError> {
        // `execute` yields a row count, `fetch_scalar` a SqlValue
        let value = if plan.operation_kind.is_mutation() {
            quote!(::sqlgen::ToSqlValue::to_sql_value(&#fetched))
        } else {
            fetched
        };
        let ty = &self.method()?.ok_type;
        Ok(match cast {
            ScalarCast::To(_) => quote! {
                <#ty as ::sqlgen::FromSqlValue>::from_sql_value(#value)?
            },
            ScalarCast::CountToBool => quote! {
                <i64 as ::sqlgen::FromSqlValue>::from_sql_value(#value)? > 0
            }
        })
    }

    fn emit_mapping(&mut self, fetched: TokenStream, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        let decode = self.decode(plan)?;
        match plan.cardinality {
            Cardinality::List => Ok(quote! {
                #fetched
                    .into_iter()
                    .map(|__row| #decode)
                    .collect::<::core::result::Result<_, ::sqlgen::SqlError>>()?
            }),
            Cardinality::Optional => Ok(quote! {
                #fetched.map(|__row| #decode).transpose()?
            }),
            Cardinality::Single => Ok(quote! {{
                let __row = #fetched;
                #decode?
            }}),
            other => Err(EmitError::Unmappable(other))
        }
    }

    fn emit_constant(&mut self, value: bool) -> Result<TokenStream, EmitError> {
        Ok(quote!(#value))
    }

    fn emit_placeholder(&mut self, _method: &str, cardinality: Cardinality) -> Result<TokenStream, EmitError> {
        let name = &self.method()?.name;
        let result = match cardinality {
            Cardinality::List | Cardinality::Scalar => {
                quote!(::core::result::Result::Ok(::core::default::Default::default()))
            }
            Cardinality::Optional => quote!(::core::result::Result::Ok(::core::option::Option::None)),
            Cardinality::Boolean => quote!(::core::result::Result::Ok(false)),
            Cardinality::Void => quote!(::core::result::Result::Ok(())),
            Cardinality::Single => {
                let message = format!("`{name}` matches no query convention");
                quote!(::core::unimplemented!("{}", #message))
            }
        };
        Ok(quote! {
            ::sqlgen::__private::unsupported_method(#name);
            #result
        })
    }

    fn finish(&mut self, body: TokenStream, plan: &QueryExecutionPlan) -> Result<TokenStream, EmitError> {
        Ok(match plan.cardinality {
            Cardinality::Void => quote! {
                #body;
                ::core::result::Result::Ok(())
            },
            _ => quote!(::core::result::Result::Ok(#body))
        })
    }
}
