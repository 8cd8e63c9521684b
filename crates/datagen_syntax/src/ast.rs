//! Abstract Syntax Tree definitions for the datagen source language.
//!
//! The tree is plain data: every node is owned, cloneable and compared structurally.
//! Spans travel alongside nodes through [`Spanned`], so two trees that differ only in source
//! positions can be compared with [`SpanlessEq`].

use std::fmt;

use datagen_core::lang::operators::{self, OperatorId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

// ============================================================================
// Declarations
// ============================================================================

/// Root container for one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub declarations: Vec<Spanned<Declaration>>,
}

impl CompilationUnit {
    /// Iterate over top-level type declarations.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter_map(|d| match &d.node {
            Declaration::Type(t) => Some(t),
            _ => None,
        })
    }
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Import(ImportDecl),
    Type(TypeDecl),
    Function(MethodDecl),
}

/// `import a.b.C;`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub path: Vec<Ident>,
}

/// `@Name` or `@a.b.Name`. Annotations carry no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub path: Vec<Ident>,
}

impl Annotation {
    /// Last path segment (`Data` for `@a.b.Data`).
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    /// Dotted spelling of the full path.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// `class Name { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub visibility: Visibility,
    pub name: Ident,
    pub members: Vec<Spanned<Member>>,
}

impl TypeDecl {
    /// Direct field members in declaration order as `(member index, field, member span)`.
    pub fn fields(&self) -> impl Iterator<Item = (usize, &FieldDecl, Span)> + '_ {
        self.members.iter().enumerate().filter_map(|(i, m)| match &m.node {
            Member::Field(f) => Some((i, f, m.span)),
            _ => None,
        })
    }

    /// Direct method members.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match &m.node {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    /// Find a direct method by name.
    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == name)
    }
}

/// Members of a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(Vec<Spanned<Statement>>),
    Type(TypeDecl),
}

impl Member {
    /// Human-readable member kind for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Member::Field(_) => "field",
            Member::Method(_) => "method",
            Member::Constructor(_) => "constructor",
            Member::Initializer(_) => "initializer",
            Member::Type(_) => "nested type",
        }
    }

    /// Annotations attached to the member (initializers carry none).
    pub fn annotations(&self) -> &[Spanned<Annotation>] {
        match self {
            Member::Field(f) => &f.annotations,
            Member::Method(m) => &m.annotations,
            Member::Constructor(c) => &c.annotations,
            Member::Initializer(_) => &[],
            Member::Type(t) => &t.annotations,
        }
    }

    /// Declared name, if the member kind has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(f) => Some(&f.name),
            Member::Method(m) => Some(&m.name),
            Member::Type(t) => Some(&t.name),
            Member::Constructor(_) | Member::Initializer(_) => None,
        }
    }
}

/// `name: Type = default;`
///
/// Both the type and the default are optional in the grammar. A field without a type is still
/// parsed, but cannot have accessors synthesized for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub visibility: Visibility,
    pub name: Ident,
    pub ty: Option<Spanned<Type>>,
    pub default: Option<Spanned<Expr>>,
}

/// `fn name(params): Type { body }`. Used for both methods and top-level functions.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub visibility: Visibility,
    pub name: Ident,
    pub params: Vec<Spanned<Param>>,
    pub return_type: Spanned<Type>,
    pub body: Vec<Spanned<Statement>>,
}

/// `new(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub visibility: Visibility,
    pub params: Vec<Spanned<Param>>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Spanned<Type>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `a.b.Name<Args>`
    Named { path: Vec<Ident>, args: Vec<Spanned<Type>> },
    /// `T[]`
    Array(Box<Spanned<Type>>),
    Void,
}

impl Type {
    /// A single-segment type with no arguments.
    pub fn simple(name: impl Into<Ident>) -> Self {
        Type::Named {
            path: vec![name.into()],
            args: Vec::new(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named { path, args } => {
                write!(f, "{}", path.join("."))?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg.node)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Array(inner) => write!(f, "{}[]", inner.node),
            Type::Void => write!(f, "void"),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStmt),
    Assign(AssignStmt),
    Return(Option<Spanned<Expr>>),
    If(IfStmt),
    While(WhileStmt),
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Ident,
    pub ty: Option<Spanned<Type>>,
    pub value: Option<Spanned<Expr>>,
}

/// `target = value;` where target is an identifier or a field access.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Spanned<Statement>>,
    pub else_body: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    This,
    /// `base.name`
    Field(Box<Spanned<Expr>>, Ident),
    /// `callee(args)`
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    /// `receiver.name(args)`
    MethodCall(Box<Spanned<Expr>>, Ident, Vec<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    Paren(Box<Spanned<Expr>>),
}

impl Expr {
    /// `this.<name>`
    pub fn this_field(name: impl Into<Ident>, span: Span) -> Self {
        Expr::Field(Box::new(Spanned::new(Expr::This, span)), name.into())
    }

    /// If this is `this.<name>`, return `name`.
    pub fn as_this_field(&self) -> Option<&str> {
        match self {
            Expr::Field(base, name) if matches!(base.node, Expr::This) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            UnaryOp::Neg => OperatorId::Minus,
            UnaryOp::Not => OperatorId::Bang,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Mod => OperatorId::Percent,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
        }
    }

    pub fn precedence(self) -> u8 {
        operators::info_for(self.operator_id()).precedence
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator_id()))
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator_id()))
    }
}

// ============================================================================
// Span-insensitive comparison
// ============================================================================

/// Structural equality that ignores [`Span`]s.
///
/// Used to recognise a member that is the same as one about to be synthesized even when it
/// came from a different parse of the source (and therefore carries different spans).
pub trait SpanlessEq {
    fn spanless_eq(&self, other: &Self) -> bool;
}

impl<T: SpanlessEq> SpanlessEq for Spanned<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.node.spanless_eq(&other.node)
    }
}

impl<T: SpanlessEq> SpanlessEq for Box<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        (**self).spanless_eq(&**other)
    }
}

impl<T: SpanlessEq> SpanlessEq for Option<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.spanless_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: SpanlessEq> SpanlessEq for Vec<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.spanless_eq(b))
    }
}

/// Leaf types compare with `==`.
macro_rules! spanless_via_eq {
    ($($ty:ty),* $(,)?) => {
        $(impl SpanlessEq for $ty {
            fn spanless_eq(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

spanless_via_eq!(String, Visibility, Annotation, Literal, UnaryOp, BinaryOp);

impl SpanlessEq for Type {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Named { path: p1, args: a1 }, Type::Named { path: p2, args: a2 }) => {
                p1 == p2 && a1.spanless_eq(a2)
            }
            (Type::Array(a), Type::Array(b)) => a.spanless_eq(b),
            (Type::Void, Type::Void) => true,
            _ => false,
        }
    }
}

impl SpanlessEq for Expr {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Literal(a), Expr::Literal(b)) => a == b,
            (Expr::Ident(a), Expr::Ident(b)) => a == b,
            (Expr::This, Expr::This) => true,
            (Expr::Field(b1, n1), Expr::Field(b2, n2)) => n1 == n2 && b1.spanless_eq(b2),
            (Expr::Call(c1, a1), Expr::Call(c2, a2)) => c1.spanless_eq(c2) && a1.spanless_eq(a2),
            (Expr::MethodCall(r1, n1, a1), Expr::MethodCall(r2, n2, a2)) => {
                n1 == n2 && r1.spanless_eq(r2) && a1.spanless_eq(a2)
            }
            (Expr::Unary(o1, e1), Expr::Unary(o2, e2)) => o1 == o2 && e1.spanless_eq(e2),
            (Expr::Binary(l1, o1, r1), Expr::Binary(l2, o2, r2)) => {
                o1 == o2 && l1.spanless_eq(l2) && r1.spanless_eq(r2)
            }
            (Expr::Paren(a), Expr::Paren(b)) => a.spanless_eq(b),
            _ => false,
        }
    }
}

impl SpanlessEq for Statement {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Statement::Let(a), Statement::Let(b)) => {
                a.name == b.name && a.ty.spanless_eq(&b.ty) && a.value.spanless_eq(&b.value)
            }
            (Statement::Assign(a), Statement::Assign(b)) => {
                a.target.spanless_eq(&b.target) && a.value.spanless_eq(&b.value)
            }
            (Statement::Return(a), Statement::Return(b)) => a.spanless_eq(b),
            (Statement::If(a), Statement::If(b)) => {
                a.condition.spanless_eq(&b.condition)
                    && a.then_body.spanless_eq(&b.then_body)
                    && a.else_body.spanless_eq(&b.else_body)
            }
            (Statement::While(a), Statement::While(b)) => {
                a.condition.spanless_eq(&b.condition) && a.body.spanless_eq(&b.body)
            }
            (Statement::Expr(a), Statement::Expr(b)) => a.spanless_eq(b),
            _ => false,
        }
    }
}

impl SpanlessEq for Param {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty.spanless_eq(&other.ty)
    }
}

impl SpanlessEq for MethodDecl {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.visibility == other.visibility
            && self.name == other.name
            && self.annotations.spanless_eq(&other.annotations)
            && self.params.spanless_eq(&other.params)
            && self.return_type.spanless_eq(&other.return_type)
            && self.body.spanless_eq(&other.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp<T>(node: T, at: usize) -> Spanned<T> {
        Spanned::new(node, Span::new(at, at + 1))
    }

    #[test]
    fn test_span_merge() {
        assert_eq!(Span::new(4, 6).merge(Span::new(1, 5)), Span::new(1, 6));
    }

    #[test]
    fn test_type_display() {
        let ty = Type::Named {
            path: vec!["Map".into()],
            args: vec![sp(Type::simple("String"), 0), sp(Type::Array(Box::new(sp(Type::simple("Int"), 0))), 0)],
        };
        assert_eq!(ty.to_string(), "Map<String, Int[]>");
        assert_eq!(Type::Void.to_string(), "void");
    }

    #[test]
    fn test_spanless_eq_ignores_positions() {
        let a = sp(Expr::this_field("name", Span::new(0, 4)), 0);
        let b = sp(Expr::this_field("name", Span::new(90, 94)), 77);
        assert_ne!(a, b);
        assert!(a.spanless_eq(&b));
    }

    #[test]
    fn test_spanless_eq_sees_structure() {
        let a = Expr::this_field("name", Span::default());
        let b = Expr::this_field("other", Span::default());
        assert!(!a.spanless_eq(&b));
    }

    #[test]
    fn test_as_this_field() {
        assert_eq!(Expr::this_field("x", Span::default()).as_this_field(), Some("x"));
        assert_eq!(Expr::Ident("x".into()).as_this_field(), None);
    }
}
