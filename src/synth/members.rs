//! Member synthesizer: one getter and one setter per field.
//!
//! Pure and stateless. Given the same field it always produces structurally identical methods,
//! every new node carrying the field's span.
//!
//! For a field `name: T` the output is
//!
//! ```text
//! pub fn getName(): T { return this.name; }
//! pub fn setName(name: T) { this.name = name; }
//! ```

use datagen_core::lang::conventions::{self, AccessorKind};
use datagen_syntax::ast::*;

use super::errors::SynthError;

/// The two accessors synthesized for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorPair {
    pub getter: MethodDecl,
    pub setter: MethodDecl,
}

impl AccessorPair {
    pub fn into_methods(self) -> [MethodDecl; 2] {
        [self.getter, self.setter]
    }
}

/// Build the accessor pair for `field` of type `owner`.
///
/// ## Errors
/// Fails without producing anything if the field has no type, is `void`, or its name is not an
/// identifier.
pub fn synthesize(owner: &str, field: &FieldDecl, span: Span) -> Result<AccessorPair, SynthError> {
    if field.name.is_empty() || !conventions::is_identifier(&field.name) {
        return Err(SynthError::InvalidFieldName {
            owner: owner.to_string(),
            field: field.name.clone(),
            span,
        });
    }
    let Some(ty) = &field.ty else {
        return Err(SynthError::MissingType {
            owner: owner.to_string(),
            field: field.name.clone(),
            span,
        });
    };
    if ty.node.is_void() {
        return Err(SynthError::VoidType {
            owner: owner.to_string(),
            field: field.name.clone(),
            span,
        });
    }

    Ok(AccessorPair {
        getter: getter(&field.name, ty, span),
        setter: setter(&field.name, ty, span),
    })
}

/// `pub fn get<Name>(): T { return this.<name>; }`
pub fn getter(field: &str, ty: &Spanned<Type>, span: Span) -> MethodDecl {
    let read = Spanned::new(Expr::this_field(field, span), span);
    MethodDecl {
        annotations: Vec::new(),
        visibility: Visibility::Public,
        name: conventions::accessor_name(AccessorKind::Getter, field),
        params: Vec::new(),
        return_type: ty.clone(),
        body: vec![Spanned::new(Statement::Return(Some(read)), span)],
    }
}

/// `pub fn set<Name>(<name>: T) { this.<name> = <name>; }`
pub fn setter(field: &str, ty: &Spanned<Type>, span: Span) -> MethodDecl {
    let assign = AssignStmt {
        target: Spanned::new(Expr::this_field(field, span), span),
        value: Spanned::new(Expr::Ident(field.to_string()), span),
    };
    MethodDecl {
        annotations: Vec::new(),
        visibility: Visibility::Public,
        name: conventions::accessor_name(AccessorKind::Setter, field),
        params: vec![Spanned::new(
            Param {
                name: field.to_string(),
                ty: ty.clone(),
            },
            span,
        )],
        return_type: Spanned::new(Type::Void, span),
        body: vec![Spanned::new(Statement::Assign(assign), span)],
    }
}
