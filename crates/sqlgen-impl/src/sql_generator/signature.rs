// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `syn` method signatures to engine [`MethodSignature`]s.
//!
//! Method names are camel-cased for the engine's grammar
//! (`find_by_user_token` → `findByUserToken`). Generated methods must be
//! `async`, take `&self`, and return `Result<T, E>`; `T` is the shape the
//! result is mapped to.

use convert_case::{Case, Casing};
use sqlgen_engine::{DeclaredParameter, Issue, MethodSignature};
use syn::{FnArg, Ident, ImplItemFn, LitStr, Pat, ReturnType, Signature, Type, ext::IdentExt};

use crate::utils::types::{first_type_argument, result_ok, type_ref};

/// A method ready for the engine plus the tokens the emitter needs.
#[derive(Debug)]
pub struct ParsedMethod {
    /// Engine view.
    pub signature: MethodSignature,
    /// Rust method name, for runtime logging.
    pub rust_name: String,
    /// Parameter identifiers in declaration order.
    pub arguments: Vec<Ident>,
    /// `T` of `Result<T, E>`.
    pub ok_type:   Type,
    /// `U` of `T = Vec<U>` / `Option<U>`.
    pub element:   Option<Type>
}

/// Engine spelling of a method name.
pub fn method_name(ident: &Ident) -> String {
    ident.unraw().to_string().to_case(Case::Camel)
}

/// Strip `#[param("name")]` from every parameter and return the renames in
/// declaration order.
///
/// # Errors
///
/// `#[param]` without a single string literal.
pub fn take_param_renames(sig: &mut Signature) -> syn::Result<Vec<Option<String>>> {
    let mut renames = Vec::new();
    for input in sig.inputs.iter_mut() {
        let FnArg::Typed(arg) = input else {
            continue;
        };
        let mut rename = None;
        let mut kept = Vec::with_capacity(arg.attrs.len());
        for attr in arg.attrs.drain(..) {
            if attr.path().is_ident("param") {
                rename = Some(attr.parse_args::<LitStr>()?.value());
            } else {
                kept.push(attr);
            }
        }
        arg.attrs = kept;
        renames.push(rename);
    }
    Ok(renames)
}

/// Convert `method` for the engine.
///
/// # Errors
///
/// The [`Issue`] that prevents generating the method: not `async`, no
/// `&self`, a pattern parameter, or a return type other than `Result`.
pub fn parse(method: &ImplItemFn, renames: &[Option<String>]) -> Result<ParsedMethod, Issue> {
    let sig = &method.sig;
    let name = method_name(&sig.ident);

    if sig.asyncness.is_none() {
        return Err(Issue::NotAsync {
            method: name
        });
    }
    if sig.receiver().is_none() {
        return Err(Issue::EmissionFailed {
            method: name,
            stage:  "signature".into(),
            reason: "generated methods take `&self`".into()
        });
    }

    let mut params = Vec::new();
    let mut arguments = Vec::new();
    let typed = sig.inputs.iter().filter_map(|input| match input {
        FnArg::Typed(arg) => Some(arg),
        FnArg::Receiver(_) => None
    });
    for (index, arg) in typed.enumerate() {
        let Pat::Ident(pat) = &*arg.pat else {
            return Err(Issue::EmissionFailed {
                method: name,
                stage:  "signature".into(),
                reason: "parameters must be plain identifiers".into()
            });
        };
        let mut param = DeclaredParameter::new(pat.ident.unraw().to_string(), type_ref(&arg.ty));
        if let Some(Some(rename)) = renames.get(index) {
            param = param.renamed(rename.clone());
        }
        params.push(param);
        arguments.push(pat.ident.clone());
    }

    let ReturnType::Type(_, returns) = &sig.output else {
        return Err(Issue::UnsupportedReturn {
            method: name,
            reason: "expected `Result<T, E>`, found `()`".into()
        });
    };
    let Some(ok_type) = result_ok(returns) else {
        return Err(Issue::UnsupportedReturn {
            method: name,
            reason: "expected `Result<T, E>`".into()
        });
    };

    Ok(ParsedMethod {
        signature: MethodSignature {
            name,
            params,
            returns: type_ref(ok_type),
            has_body: !method.block.stmts.is_empty()
        },
        rust_name: sig.ident.unraw().to_string(),
        arguments,
        ok_type: ok_type.clone(),
        element: first_type_argument(ok_type).cloned()
    })
}
