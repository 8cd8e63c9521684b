//! Statement emission.

use datagen_syntax::ast::{IfStmt, Spanned, Statement};
use proc_macro2::TokenStream;
use quote::quote;

use super::expressions::BodyCx;
use super::types::{emit_type, ident};
use super::{EmitError, RustEmitter};

impl RustEmitter {
    pub(super) fn emit_block(&self, body: &[Spanned<Statement>], cx: &BodyCx<'_>) -> Result<Vec<TokenStream>, EmitError> {
        body.iter().map(|s| self.emit_statement(&s.node, cx)).collect()
    }

    fn emit_statement(&self, stmt: &Statement, cx: &BodyCx<'_>) -> Result<TokenStream, EmitError> {
        match stmt {
            Statement::Let(let_stmt) => {
                let name = ident(&let_stmt.name)?;
                let mutability = if cx.is_mut_local(&let_stmt.name) {
                    quote! { mut }
                } else {
                    quote! {}
                };
                let ty = match &let_stmt.ty {
                    Some(ty) => {
                        let ty = emit_type(&ty.node)?;
                        quote! { : #ty }
                    }
                    None => quote! {},
                };
                match &let_stmt.value {
                    Some(value) => {
                        let value = self.emit_expr(&value.node, cx)?;
                        Ok(quote! { let #mutability #name #ty = #value; })
                    }
                    None => Ok(quote! { let #mutability #name #ty; }),
                }
            }
            Statement::Assign(assign) => {
                let target = self.emit_place(&assign.target.node, cx)?;
                let value = self.emit_expr(&assign.value.node, cx)?;
                Ok(quote! { #target = #value; })
            }
            Statement::Return(value) => match (value, cx.in_constructor) {
                (None, false) => Ok(quote! { return; }),
                (None, true) => Ok(quote! { return this; }),
                (Some(_), true) => Err(EmitError::Unsupported(
                    "constructors cannot return a value".to_string(),
                )),
                (Some(value), false) => {
                    let value = self.emit_expr(&value.node, cx)?;
                    Ok(quote! { return #value; })
                }
            },
            Statement::If(if_stmt) => self.emit_if(if_stmt, cx),
            Statement::While(while_stmt) => {
                let condition = self.emit_expr(&while_stmt.condition.node, cx)?;
                let body = self.emit_block(&while_stmt.body, cx)?;
                Ok(quote! {
                    while #condition {
                        #(#body)*
                    }
                })
            }
            Statement::Expr(expr) => {
                let expr = self.emit_expr(&expr.node, cx)?;
                Ok(quote! { #expr; })
            }
        }
    }

    fn emit_if(&self, if_stmt: &IfStmt, cx: &BodyCx<'_>) -> Result<TokenStream, EmitError> {
        let condition = self.emit_expr(&if_stmt.condition.node, cx)?;
        let then_body = self.emit_block(&if_stmt.then_body, cx)?;

        let else_branch = match if_stmt.else_body.as_deref() {
            None => quote! {},
            Some(
                [
                    Spanned {
                        node: Statement::If(nested),
                        ..
                    },
                ],
            ) => {
                let nested = self.emit_if(nested, cx)?;
                quote! { else #nested }
            }
            Some(body) => {
                let body = self.emit_block(body, cx)?;
                quote! { else { #(#body)* } }
            }
        };

        Ok(quote! {
            if #condition {
                #(#then_body)*
            } #else_branch
        })
    }
}
