//! Write analysis over statement bodies.
//!
//! Decides where the emitted Rust needs `mut`: methods that write through `this` take
//! `&mut self`, and locals or parameters that are reassigned or mutated get `let mut` / `mut`.

use std::collections::HashSet;

use datagen_syntax::ast::{Expr, Spanned, Statement};

/// Library methods that need a mutable receiver.
pub(super) const MUTATING_METHODS: &[&str] = &[
    "push", "pop", "insert", "remove", "clear", "extend", "truncate", "sort", "reverse", "retain", "append", "drain",
];

/// What a body writes to.
#[derive(Debug, Default)]
pub(super) struct Writes {
    /// Assigns to `this.*` or calls a mutating method through `this`
    pub this_written: bool,
    /// Locals and parameters that are reassigned or mutated
    pub locals: HashSet<String>,
}

enum Root<'a> {
    This,
    Local(&'a str),
}

/// Base variable of a place expression (`this.a.b` -> `this`, `p.name` -> `p`).
fn root_of(expr: &Expr) -> Option<Root<'_>> {
    match expr {
        Expr::This => Some(Root::This),
        Expr::Ident(name) => Some(Root::Local(name)),
        Expr::Field(base, _) => root_of(&base.node),
        Expr::Paren(inner) => root_of(&inner.node),
        _ => None,
    }
}

/// Scan `body`; `is_mutating` decides which method names need a mutable receiver.
pub(super) fn scan_body(body: &[Spanned<Statement>], is_mutating: &dyn Fn(&str) -> bool) -> Writes {
    let mut writes = Writes::default();
    for stmt in body {
        scan_stmt(&stmt.node, is_mutating, &mut writes);
    }
    writes
}

fn record(root: Option<Root<'_>>, writes: &mut Writes) {
    match root {
        Some(Root::This) => writes.this_written = true,
        Some(Root::Local(name)) => {
            writes.locals.insert(name.to_string());
        }
        None => {}
    }
}

fn scan_stmt(stmt: &Statement, is_mutating: &dyn Fn(&str) -> bool, writes: &mut Writes) {
    match stmt {
        Statement::Let(let_stmt) => {
            if let Some(value) = &let_stmt.value {
                scan_expr(&value.node, is_mutating, writes);
            }
        }
        Statement::Assign(assign) => {
            record(root_of(&assign.target.node), writes);
            scan_expr(&assign.target.node, is_mutating, writes);
            scan_expr(&assign.value.node, is_mutating, writes);
        }
        Statement::Return(value) => {
            if let Some(value) = value {
                scan_expr(&value.node, is_mutating, writes);
            }
        }
        Statement::If(if_stmt) => {
            scan_expr(&if_stmt.condition.node, is_mutating, writes);
            for s in &if_stmt.then_body {
                scan_stmt(&s.node, is_mutating, writes);
            }
            for s in if_stmt.else_body.iter().flatten() {
                scan_stmt(&s.node, is_mutating, writes);
            }
        }
        Statement::While(while_stmt) => {
            scan_expr(&while_stmt.condition.node, is_mutating, writes);
            for s in &while_stmt.body {
                scan_stmt(&s.node, is_mutating, writes);
            }
        }
        Statement::Expr(expr) => scan_expr(&expr.node, is_mutating, writes),
    }
}

fn scan_expr(expr: &Expr, is_mutating: &dyn Fn(&str) -> bool, writes: &mut Writes) {
    match expr {
        Expr::Literal(_) | Expr::Ident(_) | Expr::This => {}
        Expr::Field(base, _) => scan_expr(&base.node, is_mutating, writes),
        Expr::Call(callee, args) => {
            scan_expr(&callee.node, is_mutating, writes);
            for arg in args {
                scan_expr(&arg.node, is_mutating, writes);
            }
        }
        Expr::MethodCall(receiver, name, args) => {
            if is_mutating(name) {
                record(root_of(&receiver.node), writes);
            }
            scan_expr(&receiver.node, is_mutating, writes);
            for arg in args {
                scan_expr(&arg.node, is_mutating, writes);
            }
        }
        Expr::Unary(_, operand) => scan_expr(&operand.node, is_mutating, writes),
        Expr::Binary(left, _, right) => {
            scan_expr(&left.node, is_mutating, writes);
            scan_expr(&right.node, is_mutating, writes);
        }
        Expr::Paren(inner) => scan_expr(&inner.node, is_mutating, writes),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use datagen_syntax::ast::Declaration;

    fn body_of(source: &str) -> Vec<Spanned<Statement>> {
        let unit = datagen_syntax::parse_source(source).unwrap();
        match unit.declarations.into_iter().next().map(|d| d.node) {
            Some(Declaration::Function(f)) => f.body,
            other => panic!("Expected function, got {other:?}"),
        }
    }

    fn lib_only(name: &str) -> bool {
        MUTATING_METHODS.contains(&name)
    }

    #[test]
    fn test_this_assignment() {
        let writes = scan_body(&body_of("fn f() { if a { this.x.y = 1; } }"), &lib_only);
        assert!(writes.this_written);
        assert!(writes.locals.is_empty());
    }

    #[test]
    fn test_local_writes() {
        let writes = scan_body(
            &body_of("fn f() { let a = 1; a = 2; let items = x(); items.push(1); let p = P(); p.name = n; q.len(); }"),
            &lib_only,
        );
        assert!(!writes.this_written);
        let mut locals: Vec<_> = writes.locals.into_iter().collect();
        locals.sort();
        assert_eq!(locals, vec!["a", "items", "p"]);
    }

    #[test]
    fn test_custom_mutating_method_on_this() {
        let body = body_of("fn f() { this.setName(n); }");
        assert!(!scan_body(&body, &lib_only).this_written);
        assert!(scan_body(&body, &|name: &str| name == "setName").this_written);
    }
}
