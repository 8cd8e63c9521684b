//! Expression emission.
//!
//! Ownership follows a simple rule: reading a field by value clones it unless its type is a
//! `Copy` builtin, while receivers of calls and assignment targets are used in place. String
//! literals become owned `String`s, except on the right of `+` where a `&str` is what
//! `String + &str` wants.

use std::collections::HashSet;

use datagen_syntax::ast::{BinaryOp, Expr, Literal, Spanned, UnaryOp};
use proc_macro2::{Literal as RustLiteral, TokenStream};
use quote::quote;

use super::types::{ident, is_copy, is_string};
use super::{ClassInfo, EmitError, RustEmitter};

/// What `this` lowers to inside a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Receiver {
    /// Free function or field default: `this` is not available
    None,
    /// Method: `self`
    SelfRef,
    /// Constructor: the local `this` being built
    Local,
}

/// Per-body emission context.
pub(super) struct BodyCx<'e> {
    pub class: Option<&'e ClassInfo>,
    pub receiver: Receiver,
    pub in_constructor: bool,
    mut_locals: HashSet<String>,
}

impl<'e> BodyCx<'e> {
    pub fn new(class: Option<&'e ClassInfo>, receiver: Receiver, in_constructor: bool, mut_locals: HashSet<String>) -> Self {
        Self {
            class,
            receiver,
            in_constructor,
            mut_locals,
        }
    }

    pub fn is_mut_local(&self, name: &str) -> bool {
        self.mut_locals.contains(name)
    }

    /// `true` if `expr` is `this.<field>` for a field of `Copy` type.
    fn is_copy_field(&self, expr: &Expr) -> bool {
        self.this_field_type(expr).is_some_and(is_copy)
    }

    fn is_string_field(&self, expr: &Expr) -> bool {
        self.this_field_type(expr).is_some_and(is_string)
    }

    fn this_field_type(&self, expr: &Expr) -> Option<&datagen_syntax::ast::Type> {
        let name = expr.as_this_field()?;
        self.class?.fields.get(name)
    }
}

/// How an expression's value is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Usage {
    /// Moved or copied out
    Value,
    /// Used in place: call receiver, field base, assignment target
    Place,
}

impl RustEmitter {
    /// Emit an expression whose value is consumed.
    pub(super) fn emit_expr(&self, expr: &Expr, cx: &BodyCx<'_>) -> Result<TokenStream, EmitError> {
        self.emit_expr_as(expr, cx, Usage::Value)
    }

    /// Emit an assignment target.
    pub(super) fn emit_place(&self, expr: &Expr, cx: &BodyCx<'_>) -> Result<TokenStream, EmitError> {
        self.emit_expr_as(expr, cx, Usage::Place)
    }

    fn emit_expr_as(&self, expr: &Expr, cx: &BodyCx<'_>, usage: Usage) -> Result<TokenStream, EmitError> {
        match expr {
            Expr::Literal(lit) => emit_literal(lit, usage),
            Expr::Ident(name) => {
                let name = ident(name)?;
                Ok(quote! { #name })
            }
            Expr::This => match cx.receiver {
                Receiver::SelfRef => Ok(quote! { self }),
                Receiver::Local => Ok(quote! { this }),
                Receiver::None => Err(EmitError::Unsupported("'this' used outside of a class body".to_string())),
            },
            Expr::Field(base, name) => {
                let base_tokens = self.emit_expr_as(&base.node, cx, Usage::Place)?;
                let name = ident(name)?;
                if usage == Usage::Value && !cx.is_copy_field(expr) {
                    Ok(quote! { #base_tokens.#name.clone() })
                } else {
                    Ok(quote! { #base_tokens.#name })
                }
            }
            Expr::Call(callee, args) => self.emit_call(callee, args, cx),
            Expr::MethodCall(receiver, name, args) => {
                let receiver = self.emit_expr_as(&receiver.node, cx, Usage::Place)?;
                let name = ident(name)?;
                let args = self.emit_args(args, cx)?;
                Ok(quote! { #receiver.#name(#(#args),*) })
            }
            Expr::Unary(op, operand) => {
                let operand = self.emit_expr(&operand.node, cx)?;
                Ok(match op {
                    UnaryOp::Neg => quote! { -#operand },
                    UnaryOp::Not => quote! { !#operand },
                })
            }
            Expr::Binary(left, op, right) => self.emit_binary(left, *op, right, cx),
            Expr::Paren(inner) => {
                let inner = self.emit_expr_as(&inner.node, cx, usage)?;
                Ok(quote! { (#inner) })
            }
        }
    }

    fn emit_args(&self, args: &[Spanned<Expr>], cx: &BodyCx<'_>) -> Result<Vec<TokenStream>, EmitError> {
        args.iter().map(|a| self.emit_expr(&a.node, cx)).collect()
    }

    /// Calls to a class name construct it; anything else is a plain call.
    fn emit_call(&self, callee: &Spanned<Expr>, args: &[Spanned<Expr>], cx: &BodyCx<'_>) -> Result<TokenStream, EmitError> {
        let args_tokens = self.emit_args(args, cx)?;
        if let Expr::Ident(name) = &callee.node {
            if let Some(class) = self.classes.get(name) {
                let ty = ident(name)?;
                if class.has_new {
                    return Ok(quote! { #ty::new(#(#args_tokens),*) });
                }
                if args.is_empty() {
                    return Ok(quote! { #ty::default() });
                }
                return Err(EmitError::Unsupported(format!(
                    "'{}' has no constructor but is called with {} argument(s)",
                    name,
                    args.len()
                )));
            }
        }
        let callee = self.emit_expr_as(&callee.node, cx, Usage::Place)?;
        Ok(quote! { #callee(#(#args_tokens),*) })
    }

    fn emit_binary(
        &self,
        left: &Spanned<Expr>,
        op: BinaryOp,
        right: &Spanned<Expr>,
        cx: &BodyCx<'_>,
    ) -> Result<TokenStream, EmitError> {
        let l = self.emit_expr(&left.node, cx)?;

        if op == BinaryOp::Add {
            if let Expr::Literal(Literal::String(s)) = &right.node {
                return Ok(quote! { #l + #s });
            }
            let string_left = matches!(left.node, Expr::Literal(Literal::String(_))) || cx.is_string_field(&left.node);
            if string_left || cx.is_string_field(&right.node) {
                let r = self.emit_expr_as(&right.node, cx, Usage::Place)?;
                return Ok(quote! { #l + &#r });
            }
        }

        let r = self.emit_expr(&right.node, cx)?;
        let op = binary_op(op);
        Ok(quote! { #l #op #r })
    }
}

fn emit_literal(lit: &Literal, usage: Usage) -> Result<TokenStream, EmitError> {
    Ok(match lit {
        Literal::Int(n) => {
            let lit = RustLiteral::i64_unsuffixed(*n);
            quote! { #lit }
        }
        Literal::Float(f) => {
            if !f.is_finite() {
                return Err(EmitError::Unsupported(format!("non-finite float literal {}", f)));
            }
            let lit = RustLiteral::f64_unsuffixed(*f);
            quote! { #lit }
        }
        Literal::String(s) => match usage {
            Usage::Value => quote! { String::from(#s) },
            Usage::Place => quote! { #s },
        },
        Literal::Bool(true) => quote! { true },
        Literal::Bool(false) => quote! { false },
        Literal::Null => quote! { None },
    })
}

fn binary_op(op: BinaryOp) -> TokenStream {
    match op {
        BinaryOp::Add => quote! { + },
        BinaryOp::Sub => quote! { - },
        BinaryOp::Mul => quote! { * },
        BinaryOp::Div => quote! { / },
        BinaryOp::Mod => quote! { % },
        BinaryOp::Eq => quote! { == },
        BinaryOp::NotEq => quote! { != },
        BinaryOp::Lt => quote! { < },
        BinaryOp::LtEq => quote! { <= },
        BinaryOp::Gt => quote! { > },
        BinaryOp::GtEq => quote! { >= },
        BinaryOp::And => quote! { && },
        BinaryOp::Or => quote! { || },
    }
}
