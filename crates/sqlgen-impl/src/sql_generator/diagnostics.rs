// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Engine issues as compiler diagnostics.
//!
//! Stable proc macros cannot emit warnings directly. A lenient issue becomes
//! a use of a `#[deprecated]` marker inside the method body, which rustc
//! reports as a warning carrying the issue text. Under `strict` every issue
//! is a `compile_error!` instead.

use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use sqlgen_engine::Issue;
use syn::{ImplItemFn, Stmt};

/// Compile-time warning statement for `issue`.
pub fn warning(issue: &Issue, span: Span) -> TokenStream {
    let note = format!("{issue} [sqlgen::{}]", issue.code());
    quote_spanned! {span=>
        {
            #[deprecated(note = #note)]
            #[allow(non_camel_case_types)]
            struct sqlgen_issue;
            let _ = sqlgen_issue;
        }
    }
}

/// `compile_error!` for `issue`.
pub fn error(issue: &Issue, span: Span) -> TokenStream {
    syn::Error::new(span, format!("{issue} [sqlgen::{}]", issue.code())).to_compile_error()
}

/// Attach `issues` to `method`: warnings go at the top of its body, errors
/// are returned for emission next to the `impl`.
pub fn report(method: &mut ImplItemFn, issues: &[Issue], strict: bool) -> Vec<TokenStream> {
    let span = method.sig.ident.span();
    if strict {
        return issues.iter().map(|issue| error(issue, span)).collect();
    }

    let mut stmts: Vec<Stmt> = issues
        .iter()
        .map(|issue| -> Stmt {
            let tokens = warning(issue, span);
            syn::parse_quote!(#tokens)
        })
        .collect();
    stmts.append(&mut method.block.stmts);
    method.block.stmts = stmts;
    Vec::new()
}
