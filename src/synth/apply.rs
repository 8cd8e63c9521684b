//! The single mutation point of the pass.

use datagen_syntax::ast::{CompilationUnit, Member, Spanned};

use super::host::ElementPath;

/// Members to append to one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEdit {
    pub path: ElementPath,
    pub members: Vec<Spanned<Member>>,
}

/// Append every edit's members to its type, in order. Existing members are never moved or removed.
///
/// Returns the number of members added. Edits whose path no longer resolves to a type are dropped.
pub fn apply_plan(unit: &mut CompilationUnit, edits: Vec<TypeEdit>) -> usize {
    let mut added = 0;
    for edit in edits {
        if edit.members.is_empty() {
            continue;
        }
        let Some(decl) = edit.path.resolve_type_mut(unit) else {
            tracing::warn!(path = %edit.path, "dropping edit for a path that is not a type");
            continue;
        };
        added += edit.members.len();
        decl.members.extend(edit.members);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_syntax::ast::{FieldDecl, Span, Visibility};

    fn field_member(name: &str) -> Spanned<Member> {
        Spanned::new(
            Member::Field(FieldDecl {
                annotations: Vec::new(),
                visibility: Visibility::Private,
                name: name.to_string(),
                ty: None,
                default: None,
            }),
            Span::default(),
        )
    }

    fn member_names(unit: &CompilationUnit, path: &ElementPath) -> Vec<String> {
        path.resolve_type(unit)
            .unwrap()
            .members
            .iter()
            .filter_map(|m| m.node.name().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_apply_appends_after_existing_members() {
        let mut unit = datagen_syntax::parse_source("class A { a: Int; class B { b: Int; } }").unwrap();
        let outer = ElementPath::root(0);
        let inner = outer.child(1);
        let added = apply_plan(
            &mut unit,
            vec![
                TypeEdit {
                    path: outer.clone(),
                    members: vec![field_member("x"), field_member("y")],
                },
                TypeEdit {
                    path: inner.clone(),
                    members: vec![field_member("z")],
                },
            ],
        );
        assert_eq!(added, 3);
        assert_eq!(member_names(&unit, &outer), vec!["a", "B", "x", "y"]);
        assert_eq!(member_names(&unit, &inner), vec!["b", "z"]);
    }

    #[test]
    fn test_apply_drops_unresolvable_edit() {
        let mut unit = datagen_syntax::parse_source("fn f() {}").unwrap();
        let before = unit.clone();
        let added = apply_plan(
            &mut unit,
            vec![TypeEdit {
                path: ElementPath::root(0),
                members: vec![field_member("x")],
            }],
        );
        assert_eq!(added, 0);
        assert_eq!(unit, before);
    }
}
