//! Identifier and type emission.
//!
//! Builtin type names resolve through the `datagen_core` type registry (`List<T>` becomes
//! `Vec<T>`, `Map<K, V>` becomes `std::collections::HashMap<K, V>`); anything else is a user
//! path and is emitted segment by segment.

use datagen_core::lang::{conventions, rust_keywords, types as builtin};
use datagen_syntax::ast::{Expr, Literal, Type, Visibility};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

use super::EmitError;

/// Turn a source identifier into a Rust identifier.
///
/// Rust keywords become raw identifiers (`type` -> `r#type`); the few that cannot be raw get a
/// trailing underscore.
pub(super) fn ident(name: &str) -> Result<Ident, EmitError> {
    if name == "_" || !conventions::is_identifier(name) {
        return Err(EmitError::InvalidIdent(name.to_string()));
    }
    if !rust_keywords::is_keyword(name) {
        return Ok(Ident::new(name, Span::call_site()));
    }
    if rust_keywords::can_be_raw(name) {
        Ok(Ident::new_raw(name, Span::call_site()))
    } else {
        Ok(format_ident!("{}_", name))
    }
}

/// `pub` for public members, nothing otherwise.
pub(super) fn visibility(vis: Visibility) -> TokenStream {
    match vis {
        Visibility::Public => quote! { pub },
        Visibility::Private => quote! {},
    }
}

/// Emit a source type as Rust tokens.
pub(super) fn emit_type(ty: &Type) -> Result<TokenStream, EmitError> {
    match ty {
        Type::Void => Ok(quote! { () }),
        Type::Array(inner) => {
            let inner = emit_type(&inner.node)?;
            Ok(quote! { Vec<#inner> })
        }
        Type::Named { path, args } => {
            let args = args
                .iter()
                .map(|arg| emit_type(&arg.node))
                .collect::<Result<Vec<_>, _>>()?;

            let segments = match builtin_of(path) {
                Some(info) => {
                    if info.arity != args.len() {
                        return Err(EmitError::Unsupported(format!(
                            "type '{}' expects {} type argument(s), found {}",
                            info.canonical,
                            info.arity,
                            args.len()
                        )));
                    }
                    info.rust_path
                        .split("::")
                        .map(|seg| Ident::new(seg, Span::call_site()))
                        .collect::<Vec<_>>()
                }
                None => path.iter().map(|seg| ident(seg)).collect::<Result<Vec<_>, _>>()?,
            };

            if args.is_empty() {
                Ok(quote! { #(#segments)::* })
            } else {
                Ok(quote! { #(#segments)::* < #(#args),* > })
            }
        }
    }
}

fn builtin_of(path: &[String]) -> Option<&'static builtin::BuiltinTypeInfo> {
    match path {
        [name] => builtin::from_str(name).map(builtin::info_for),
        _ => None,
    }
}

/// `true` for builtin scalar types whose values are `Copy` in Rust.
pub(super) fn is_copy(ty: &Type) -> bool {
    match ty {
        Type::Named { path, args } if args.is_empty() => builtin_of(path).is_some_and(|info| info.is_copy),
        _ => false,
    }
}

/// `true` for the builtin string type.
pub(super) fn is_string(ty: &Type) -> bool {
    match ty {
        Type::Named { path, args } if args.is_empty() => {
            builtin_of(path).is_some_and(|info| info.id == builtin::BuiltinTypeId::String)
        }
        _ => false,
    }
}

/// Type of an untyped field, recovered from a literal default.
pub(super) fn infer_from_default(default: &Expr) -> Option<Type> {
    let id = match default {
        Expr::Literal(Literal::Int(_)) => builtin::BuiltinTypeId::Int,
        Expr::Literal(Literal::Float(_)) => builtin::BuiltinTypeId::Float,
        Expr::Literal(Literal::Bool(_)) => builtin::BuiltinTypeId::Bool,
        Expr::Literal(Literal::String(_)) => builtin::BuiltinTypeId::String,
        _ => return None,
    };
    Some(Type::simple(builtin::as_str(id)))
}
