// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[sql_generator]` attribute macro.
//!
//! Walks the methods of an `impl` block, plans each one with the engine and
//! splices the generated body back in.
//!
//! # Module Structure
//!
//! ```text
//! sql_generator/
//! ├── attrs.rs       — #[sql_generator(...)] arguments → ClassContext
//! ├── native.rs      — #[native_query(...)] → NativeQuery
//! ├── signature.rs   — syn signatures → MethodSignature
//! ├── emit.rs        — CodeEmitter producing token streams
//! └── diagnostics.rs — engine issues → warnings or compile errors
//! ```
//!
//! # Method Handling
//!
//! | Method | Result |
//! |--------|--------|
//! | `#[native_query]` | Body generated from the SQL |
//! | Empty body, name matches a convention | Body generated from the name |
//! | Empty body, no convention | Logging placeholder plus a warning |
//! | Has a body | Left untouched |
//! | Generation failed | Original body kept plus a warning |

mod attrs;
mod diagnostics;
mod emit;
mod native;
mod signature;


use darling::{FromMeta, ast::NestedMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use sqlgen_engine::{Generator, Issue, Outcome};
use syn::{ImplItem, ImplItemFn, ItemImpl, parse_macro_input};

use self::{
    attrs::GeneratorAttrs,
    emit::{MethodTokens, TokenEmitter},
    native::NativeQueryAttrs
};

/// Main entry point for the `sql_generator` attribute.
pub fn expand(args: TokenStream, input: TokenStream) -> TokenStream {
    let items = match NestedMeta::parse_meta_list(args.into()) {
        Ok(items) => items,
        Err(err) => return darling::Error::from(err).write_errors().into()
    };
    let attrs = match GeneratorAttrs::from_list(&items) {
        Ok(attrs) => attrs,
        Err(err) => return err.write_errors().into()
    };
    let item = parse_macro_input!(input as ItemImpl);

    match generate(&attrs, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into()
    }
}

/// Rewrite `item` under `attrs`.
///
/// # Errors
///
/// Malformed `#[sql_generator]`, `#[native_query]` or `#[param]` arguments.
/// Engine issues never fail the expansion unless `strict` is set, and then
/// only as `compile_error!` items next to the `impl`.
pub fn generate(attrs: &GeneratorAttrs, mut item: ItemImpl) -> darling::Result<TokenStream2> {
    let ctx = attrs.context()?;
    let generator = Generator::new(&ctx);
    let mut emitter = TokenEmitter::new(attrs.executor_ident()?, attrs.field_idents()?);
    let mut errors = darling::Error::accumulator();
    let mut reported = Vec::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let native = errors.handle(native::take(&mut method.attrs));
        let renames = errors.handle(signature::take_param_renames(&mut method.sig).map_err(darling::Error::from));
        let (Some(native), Some(renames)) = (native, renames) else {
            continue;
        };

        let issues = expand_method(&generator, &mut emitter, method, native.as_ref(), &renames);
        reported.extend(diagnostics::report(method, &issues, attrs.strict));
    }

    errors.finish()?;
    Ok(quote! {
        #item
        #(#reported)*
    })
}

/// Generate one method in place; returns the issues to report.
fn expand_method(
    generator: &Generator<'_>,
    emitter: &mut TokenEmitter,
    method: &mut ImplItemFn,
    native: Option<&NativeQueryAttrs>,
    renames: &[Option<String>]
) -> Vec<Issue> {
    // helpers with their own body are never touched
    if native.is_none() && !method.block.stmts.is_empty() {
        return Vec::new();
    }

    let parsed = match signature::parse(method, renames) {
        Ok(parsed) => parsed,
        Err(issue) => {
            keep_body(method, &issue);
            return vec![issue];
        }
    };

    emitter.begin(MethodTokens::new(
        &parsed,
        native.and_then(|n| n.result_type.clone())
    ));
    let query = native.map(NativeQueryAttrs::to_query);
    let outcome = generator.generate(&parsed.signature, query.as_ref(), emitter);
    let issues = outcome.issues().to_vec();

    match outcome {
        Outcome::Ok(body)
        | Outcome::Warning(body, _)
        | Outcome::Unsupported {
            body: Some(body), ..
        } => {
            method.block = syn::parse_quote!({ #body });
        }
        Outcome::Unsupported {
            issues, ..
        }
        | Outcome::Fallback {
            issues, ..
        } => {
            if let Some(issue) = issues.first() {
                keep_body(method, issue);
            }
        }
        Outcome::Skipped {
            ..
        } => {}
    }

    issues
}

/// Keep the original body; an empty one becomes `unimplemented!` so the
/// method still type-checks.
fn keep_body(method: &mut ImplItemFn, issue: &Issue) {
    if method.block.stmts.is_empty() {
        let message = issue.to_string();
        method.block = syn::parse_quote!({ ::core::unimplemented!("{}", #message) });
    }
}
