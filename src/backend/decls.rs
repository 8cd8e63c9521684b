//! Emit Rust items from declarations.
//!
//! A class becomes a struct plus an `impl` block:
//! - fields keep their visibility; untyped fields take the type of their literal default
//! - `#[derive(Default)]` unless a field has a default, in which case `impl Default` is written out
//! - the constructor and any `init` blocks fold into `pub fn new(..) -> Self`
//! - every method takes `&self`, or `&mut self` if it writes through `this`
//!
//! Top-level functions become free functions and imports become `use` items.

use std::collections::HashSet;

use datagen_syntax::ast::*;
use proc_macro2::TokenStream;
use quote::quote;

use super::expressions::{BodyCx, Receiver};
use super::types::{emit_type, ident, visibility};
use super::{ClassInfo, EmitError, RustEmitter, class_tree, scan};

impl RustEmitter {
    /// Emit every item of the unit as one token stream.
    pub(super) fn emit_unit_tokens(&self, unit: &CompilationUnit) -> Result<TokenStream, EmitError> {
        let mut items = Vec::new();

        if self.add_lint_allows {
            items.push(quote! {
                #![allow(dead_code, unused_imports, unused_mut, unused_variables, non_snake_case)]
            });
        }

        for decl in &unit.declarations {
            match &decl.node {
                Declaration::Import(import) => items.push(self.emit_import(import)?),
                Declaration::Function(func) => items.push(self.emit_function(func)?),
                Declaration::Type(ty) => {
                    for class in class_tree(ty) {
                        items.push(self.emit_class(class)?);
                    }
                }
            }
        }

        Ok(quote! { #(#items)* })
    }

    fn emit_import(&self, import: &ImportDecl) -> Result<TokenStream, EmitError> {
        let segments = import.path.iter().map(|s| ident(s)).collect::<Result<Vec<_>, _>>()?;
        Ok(quote! { use #(#segments)::*; })
    }

    fn emit_function(&self, func: &MethodDecl) -> Result<TokenStream, EmitError> {
        let cx = BodyCx::new(None, Receiver::None, false, self.mutated_locals(&func.body));
        self.emit_fn(func, &cx, None)
    }

    /// Struct, optional `impl Default`, and the `impl` block for one class.
    fn emit_class(&self, class: &TypeDecl) -> Result<TokenStream, EmitError> {
        let info = self.classes.get(&class.name).ok_or_else(|| {
            EmitError::Unsupported(format!("class '{}' was not collected before emission", class.name))
        })?;
        let name = ident(&class.name)?;
        let vis = visibility(class.visibility);

        let mut field_decls = Vec::new();
        let mut field_inits = Vec::new();
        let mut has_defaults = false;
        let default_cx = BodyCx::new(Some(info), Receiver::None, false, HashSet::new());

        for (_, field, _) in class.fields() {
            let ty = info.fields.get(&field.name).ok_or_else(|| {
                EmitError::Unsupported(format!(
                    "field '{}' of '{}' has no declared type",
                    field.name, class.name
                ))
            })?;
            let fname = ident(&field.name)?;
            let fty = emit_type(ty)?;
            let fvis = visibility(field.visibility);
            field_decls.push(quote! { #fvis #fname: #fty });

            let init = match &field.default {
                Some(default) => {
                    has_defaults = true;
                    self.emit_expr(&default.node, &default_cx)?
                }
                None => quote! { Default::default() },
            };
            field_inits.push(quote! { #fname: #init });
        }

        let derive = if has_defaults {
            quote! { #[derive(Debug, Clone)] }
        } else {
            quote! { #[derive(Debug, Clone, Default)] }
        };
        let mut out = quote! {
            #derive
            #vis struct #name {
                #(#field_decls),*
            }
        };

        if has_defaults {
            out.extend(quote! {
                impl Default for #name {
                    fn default() -> Self {
                        Self {
                            #(#field_inits),*
                        }
                    }
                }
            });
        }

        let mut fns = Vec::new();
        if let Some(ctor) = self.emit_new(class, info)? {
            fns.push(ctor);
        }
        for method in class.methods() {
            let receiver = if info.mut_methods.contains(&method.name) {
                quote! { &mut self }
            } else {
                quote! { &self }
            };
            let cx = BodyCx::new(Some(info), Receiver::SelfRef, false, self.mutated_locals(&method.body));
            fns.push(self.emit_fn(method, &cx, Some(receiver))?);
        }

        if !fns.is_empty() {
            out.extend(quote! {
                impl #name {
                    #(#fns)*
                }
            });
        }
        Ok(out)
    }

    /// `new` from the constructor and initializer blocks: initializers run first, in order.
    fn emit_new(&self, class: &TypeDecl, info: &ClassInfo) -> Result<Option<TokenStream>, EmitError> {
        if !info.has_new {
            return Ok(None);
        }

        let mut ctors = class.members.iter().filter_map(|m| match &m.node {
            Member::Constructor(c) => Some(c),
            _ => None,
        });
        let ctor = ctors.next();
        if ctors.next().is_some() {
            return Err(EmitError::Unsupported(format!(
                "class '{}' declares more than one constructor",
                class.name
            )));
        }

        let mut body: Vec<&Spanned<Statement>> = class
            .members
            .iter()
            .filter_map(|m| match &m.node {
                Member::Initializer(stmts) => Some(stmts),
                _ => None,
            })
            .flatten()
            .collect();
        let (vis, params) = match ctor {
            Some(c) => {
                body.extend(c.body.iter());
                (visibility(c.visibility), c.params.as_slice())
            }
            None => (quote! { pub }, &[][..]),
        };

        let owned: Vec<Spanned<Statement>> = body.into_iter().cloned().collect();
        let cx = BodyCx::new(Some(info), Receiver::Local, true, self.mutated_locals(&owned));
        let params = self.emit_params(params, &cx)?;
        let stmts = self.emit_block(&owned, &cx)?;

        Ok(Some(quote! {
            #vis fn new(#(#params),*) -> Self {
                let mut this = Self::default();
                #(#stmts)*
                this
            }
        }))
    }

    fn emit_fn(&self, func: &MethodDecl, cx: &BodyCx<'_>, receiver: Option<TokenStream>) -> Result<TokenStream, EmitError> {
        let vis = visibility(func.visibility);
        let name = ident(&func.name)?;
        let mut params = self.emit_params(&func.params, cx)?;
        if let Some(receiver) = receiver {
            params.insert(0, receiver);
        }
        let ret = if func.return_type.node.is_void() {
            quote! {}
        } else {
            let ty = emit_type(&func.return_type.node)?;
            quote! { -> #ty }
        };
        let stmts = self.emit_block(&func.body, cx)?;

        Ok(quote! {
            #vis fn #name(#(#params),*) #ret {
                #(#stmts)*
            }
        })
    }

    fn emit_params(&self, params: &[Spanned<Param>], cx: &BodyCx<'_>) -> Result<Vec<TokenStream>, EmitError> {
        params
            .iter()
            .map(|p| {
                let name = ident(&p.node.name)?;
                let ty = emit_type(&p.node.ty.node)?;
                Ok(if cx.is_mut_local(&p.node.name) {
                    quote! { mut #name: #ty }
                } else {
                    quote! { #name: #ty }
                })
            })
            .collect()
    }

    /// Locals and parameters of `body` that need `mut`.
    fn mutated_locals(&self, body: &[Spanned<Statement>]) -> HashSet<String> {
        scan::scan_body(body, &|name: &str| self.is_mutating_method(name)).locals
    }
}
