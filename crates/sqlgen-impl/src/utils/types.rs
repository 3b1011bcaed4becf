// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `syn::Type` inspection.
//!
//! Converts Rust types to the engine's compiler-independent [`TypeRef`].
//!
//! | Rust type | `TypeRef` |
//! |-----------|-----------|
//! | `()` | `Unit` |
//! | `String`, `&str`, `char` | `Scalar(Text)` |
//! | `i8`..`i32`, `u8`, `u16` | `Scalar(Int)` |
//! | `i64`, `u32`, `u64`, `isize`, `usize` | `Scalar(Long)` |
//! | `f32`, `f64` | `Scalar(Double)` |
//! | `bool` | `Scalar(Bool)` |
//! | `Decimal` | `Scalar(Decimal)` |
//! | `Vec<T>`, `VecDeque<T>`, `HashSet<T>`, `BTreeSet<T>`, `[T]`, `[T; N]` | `Sequence` |
//! | `Option<T>` | `Optional` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `Map` |
//! | `Box<T>`, `Arc<T>`, `Rc<T>`, `Cow<'_, T>`, `&T` | same as `T` |
//! | other paths | `Named` |

use quote::ToTokens;
use sqlgen_engine::{ScalarKind, TypeRef};
use syn::{GenericArgument, Path, PathArguments, Type};

/// Engine view of `ty`.
pub fn type_ref(ty: &Type) -> TypeRef {
    match ty {
        Type::Reference(r) => type_ref(&r.elem),
        Type::Paren(p) => type_ref(&p.elem),
        Type::Group(g) => type_ref(&g.elem),
        Type::Tuple(t) if t.elems.is_empty() => TypeRef::Unit,
        Type::Slice(s) => TypeRef::sequence(type_ref(&s.elem)),
        Type::Array(a) => TypeRef::sequence(type_ref(&a.elem)),
        Type::Path(p) if p.qself.is_none() => path_ref(&p.path),
        other => TypeRef::Other(spelled(other))
    }
}

/// Engine view of a type path.
pub fn path_ref(path: &Path) -> TypeRef {
    let Some(last) = path.segments.last() else {
        return TypeRef::Other(spelled(path));
    };
    let name = last.ident.to_string();
    let args = type_arguments(&last.arguments);

    match (name.as_str(), args.as_slice()) {
        ("Vec" | "VecDeque" | "HashSet" | "BTreeSet", [inner, ..]) => TypeRef::sequence(type_ref(inner)),
        ("Option", [inner]) => TypeRef::optional(type_ref(inner)),
        ("HashMap" | "BTreeMap", [key, value, ..]) => TypeRef::map(type_ref(key), type_ref(value)),
        ("Box" | "Arc" | "Rc" | "Cow", [inner]) => type_ref(inner),
        (_, []) => match scalar_kind(&name) {
            Some(kind) => TypeRef::Scalar(kind, name),
            None => TypeRef::named(spelled(path))
        },
        _ => TypeRef::Other(spelled(path))
    }
}

/// Success type of `Result<T, E>` (or a `Result<T>` alias).
pub fn result_ok(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = strip(ty) else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    type_arguments(&last.arguments).into_iter().next()
}

/// First type argument of the outermost path, looking through references.
///
/// `Vec<User>` → `User`, `Option<i64>` → `i64`.
pub fn first_type_argument(ty: &Type) -> Option<&Type> {
    match strip(ty) {
        Type::Path(p) => p
            .path
            .segments
            .last()
            .and_then(|s| type_arguments(&s.arguments).into_iter().next()),
        Type::Slice(s) => Some(&s.elem),
        Type::Array(a) => Some(&a.elem),
        _ => None
    }
}

fn strip(ty: &Type) -> &Type {
    match ty {
        Type::Reference(r) => strip(&r.elem),
        Type::Paren(p) => strip(&p.elem),
        Type::Group(g) => strip(&g.elem),
        other => other
    }
}

fn type_arguments(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None
            })
            .collect(),
        _ => Vec::new()
    }
}

fn scalar_kind(name: &str) -> Option<ScalarKind> {
    Some(match name {
        "String" | "str" | "char" => ScalarKind::Text,
        "i8" | "i16" | "i32" | "u8" | "u16" => ScalarKind::Int,
        "i64" | "u32" | "u64" | "isize" | "usize" => ScalarKind::Long,
        "f32" | "f64" => ScalarKind::Double,
        "bool" => ScalarKind::Bool,
        "Decimal" => ScalarKind::Decimal,
        _ => return None
    })
}

/// Path text without the spaces `quote` inserts.
fn spelled(tokens: &impl ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .replace(' ', "")
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn of(ty: Type) -> TypeRef {
        type_ref(&ty)
    }

    #[test]
    fn scalars() {
        assert_eq!(
            of(parse_quote!(&str)),
            TypeRef::Scalar(ScalarKind::Text, "str".into())
        );
        assert_eq!(
            of(parse_quote!(u64)),
            TypeRef::Scalar(ScalarKind::Long, "u64".into())
        );
        assert_eq!(
            of(parse_quote!(bool)),
            TypeRef::Scalar(ScalarKind::Bool, "bool".into())
        );
        assert_eq!(
            of(parse_quote!(rust_decimal::Decimal)),
            TypeRef::Scalar(ScalarKind::Decimal, "Decimal".into())
        );
        assert_eq!(of(parse_quote!(())), TypeRef::Unit);
    }

    #[test]
    fn containers() {
        assert_eq!(
            of(parse_quote!(Vec<User>)),
            TypeRef::sequence(TypeRef::named("User"))
        );
        assert_eq!(
            of(parse_quote!(&[String])),
            TypeRef::sequence(TypeRef::Scalar(ScalarKind::Text, "String".into()))
        );
        assert_eq!(
            of(parse_quote!(Option<crate::models::User>)),
            TypeRef::optional(TypeRef::named("crate::models::User"))
        );
        assert!(of(parse_quote!(HashMap<String, SqlValue>)).is_string_keyed_map());
        assert_eq!(of(parse_quote!(Arc<User>)), TypeRef::named("User"));
    }

    #[test]
    fn unknown_shapes_are_other() {
        assert!(matches!(of(parse_quote!((i64, String))), TypeRef::Other(_)));
        assert!(matches!(of(parse_quote!(Foo<Bar>)), TypeRef::Other(_)));
    }

    #[test]
    fn result_success_type() {
        let ty: Type = parse_quote!(Result<Vec<User>, SqlError>);
        let ok = result_ok(&ty).unwrap();
        assert_eq!(type_ref(ok), TypeRef::sequence(TypeRef::named("User")));

        let alias: Type = parse_quote!(anyhow::Result<i64>);
        assert!(result_ok(&alias).is_some());

        let plain: Type = parse_quote!(Vec<User>);
        assert!(result_ok(&plain).is_none());
    }

    #[test]
    fn first_argument() {
        let ty: Type = parse_quote!(Vec<User>);
        let inner = first_type_argument(&ty).unwrap();
        assert_eq!(inner.to_token_stream().to_string(), "User");

        let scalar: Type = parse_quote!(i64);
        assert!(first_type_argument(&scalar).is_none());
    }
}
