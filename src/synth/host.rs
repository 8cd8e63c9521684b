//! Host-side element discovery.
//!
//! A round is driven by the set of elements carrying the marker. This module finds them:
//! [`collect_tagged`] scans a unit (including nested types) and returns a [`TaggedElement`] for
//! every annotated declaration or member, whatever its kind. Deciding what to do with each kind
//! is the walker's job.

use std::fmt;

use datagen_syntax::ast::{Annotation, CompilationUnit, Declaration, Member, Span, Spanned, TypeDecl};

/// Index path to an element of a compilation unit.
///
/// The first index selects a top-level declaration; every following index selects a member of
/// the type reached so far. Paths stay valid across a round because the pass only appends.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    /// Path to a top-level declaration.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path to member `index` of the type at `self`.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Resolve to a type declaration, if every step lands on a type.
    pub fn resolve_type<'u>(&self, unit: &'u CompilationUnit) -> Option<&'u TypeDecl> {
        let (first, rest) = self.0.split_first()?;
        let mut current = match &unit.declarations.get(*first)?.node {
            Declaration::Type(t) => t,
            _ => return None,
        };
        for index in rest {
            current = match &current.members.get(*index)?.node {
                Member::Type(t) => t,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable counterpart of [`ElementPath::resolve_type`].
    pub fn resolve_type_mut<'u>(&self, unit: &'u mut CompilationUnit) -> Option<&'u mut TypeDecl> {
        let (first, rest) = self.0.split_first()?;
        let mut current = match &mut unit.declarations.get_mut(*first)?.node {
            Declaration::Type(t) => t,
            _ => return None,
        };
        for index in rest {
            current = match &mut current.members.get_mut(*index)?.node {
                Member::Type(t) => t,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Kind of a tagged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Type,
    Field,
    Method,
    Constructor,
    Initializer,
    Function,
    Import,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Type => "type",
            ElementKind::Field => "field",
            ElementKind::Method => "method",
            ElementKind::Constructor => "constructor",
            ElementKind::Initializer => "initializer",
            ElementKind::Function => "function",
            ElementKind::Import => "import",
        }
    }
}

/// An element carrying the marker in the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedElement {
    pub path: ElementPath,
    pub kind: ElementKind,
    pub name: String,
    pub span: Span,
}

/// Decides whether an annotation is the configured marker.
///
/// `@a.b.Data` matches only the marker `a.b.Data`; a bare `@Data` matches any marker whose last
/// segment is `Data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatcher {
    path: Vec<String>,
}

impl MarkerMatcher {
    pub fn new(marker: &str) -> Self {
        Self {
            path: marker.split('.').map(str::to_string).collect(),
        }
    }

    pub fn matches(&self, annotation: &Annotation) -> bool {
        if annotation.path == self.path {
            return true;
        }
        match (annotation.path.as_slice(), self.path.last()) {
            ([single], Some(last)) => single == last,
            _ => false,
        }
    }

    pub fn is_tagged(&self, annotations: &[Spanned<Annotation>]) -> bool {
        annotations.iter().any(|a| self.matches(&a.node))
    }
}

/// Collect every element of `unit` that carries the marker, in source order.
pub fn collect_tagged(unit: &CompilationUnit, matcher: &MarkerMatcher) -> Vec<TaggedElement> {
    let mut tagged = Vec::new();
    for (index, decl) in unit.declarations.iter().enumerate() {
        let path = ElementPath::root(index);
        match &decl.node {
            Declaration::Type(ty) => collect_type(ty, path, decl.span, matcher, &mut tagged),
            Declaration::Function(func) => {
                if matcher.is_tagged(&func.annotations) {
                    tagged.push(TaggedElement {
                        path,
                        kind: ElementKind::Function,
                        name: func.name.clone(),
                        span: decl.span,
                    });
                }
            }
            Declaration::Import(_) => {}
        }
    }
    tagged
}

fn collect_type(
    ty: &TypeDecl,
    path: ElementPath,
    span: Span,
    matcher: &MarkerMatcher,
    out: &mut Vec<TaggedElement>,
) {
    if matcher.is_tagged(&ty.annotations) {
        out.push(TaggedElement {
            path: path.clone(),
            kind: ElementKind::Type,
            name: ty.name.clone(),
            span,
        });
    }

    for (index, member) in ty.members.iter().enumerate() {
        let member_path = path.child(index);
        if let Member::Type(nested) = &member.node {
            collect_type(nested, member_path, member.span, matcher, out);
            continue;
        }
        if !matcher.is_tagged(member.node.annotations()) {
            continue;
        }
        let kind = match &member.node {
            Member::Field(_) => ElementKind::Field,
            Member::Method(_) => ElementKind::Method,
            Member::Constructor(_) => ElementKind::Constructor,
            Member::Initializer(_) => ElementKind::Initializer,
            Member::Type(_) => ElementKind::Type,
        };
        out.push(TaggedElement {
            path: member_path,
            kind,
            name: member.node.name().unwrap_or(kind.as_str()).to_string(),
            span: member.span,
        });
    }
}
