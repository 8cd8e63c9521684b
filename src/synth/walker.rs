//! Tree walker: from tagged elements to the fields that need accessors.
//!
//! Read-only. The walker resolves each tagged type and lists its direct field members; nothing
//! else in the member list is visited, and nested types are only reached when they are tagged
//! themselves.

use std::collections::BTreeMap;

use datagen_syntax::ast::{CompilationUnit, FieldDecl, Span, TypeDecl};

use super::host::{ElementKind, ElementPath, TaggedElement};

/// A tagged type together with its direct fields in declaration order.
#[derive(Debug, Clone)]
pub struct TypeFields<'u> {
    pub path: ElementPath,
    pub decl: &'u TypeDecl,
    pub span: Span,
    /// `(member index, field, member span)`
    pub fields: Vec<(usize, &'u FieldDecl, Span)>,
}

/// Resolve the tagged types of `unit`.
///
/// The result is ordered by element path, so the order of `tagged` does not matter, and each
/// type appears once however often it was tagged. Tagged elements that are not types, or
/// whose path no longer resolves to a type, are skipped.
pub fn walk<'u>(unit: &'u CompilationUnit, tagged: &[TaggedElement]) -> Vec<TypeFields<'u>> {
    let mut seen = BTreeMap::new();
    for element in tagged {
        if element.kind != ElementKind::Type {
            tracing::debug!(
                kind = element.kind.as_str(),
                name = %element.name,
                "ignoring tagged element that is not a type"
            );
            continue;
        }
        seen.entry(element.path.clone()).or_insert(element.span);
    }

    let mut out: Vec<TypeFields<'u>> = Vec::with_capacity(seen.len());
    for (path, span) in seen {
        let Some(decl) = path.resolve_type(unit) else {
            tracing::debug!(path = %path, "tagged path does not resolve to a type");
            continue;
        };
        out.push(TypeFields {
            fields: decl.fields().collect(),
            path,
            decl,
            span,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::host::{MarkerMatcher, collect_tagged};

    fn parse(source: &str) -> CompilationUnit {
        datagen_syntax::parse_source(source).unwrap()
    }

    fn field_names(types: &[TypeFields<'_>]) -> Vec<Vec<String>> {
        types
            .iter()
            .map(|t| t.fields.iter().map(|(_, f, _)| f.name.clone()).collect())
            .collect()
    }

    #[test]
    fn test_walk_selects_direct_fields_only() {
        let unit = parse("@Data class A { a: Int; fn m() {} b: String; new() {} class N { c: Int; } init {} }");
        let tagged = collect_tagged(&unit, &MarkerMatcher::new("Data"));
        let types = walk(&unit, &tagged);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].decl.name, "A");
        assert_eq!(field_names(&types), vec![vec!["a".to_string(), "b".to_string()]]);
        let indices: Vec<_> = types[0].fields.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_walk_dedupes_and_ignores_order() {
        let unit = parse("@Data class A { a: Int; } @Data class B { b: Int; }");
        let mut tagged = collect_tagged(&unit, &MarkerMatcher::new("Data"));
        tagged.reverse();
        tagged.extend(tagged.clone());
        let types = walk(&unit, &tagged);
        let names: Vec<_> = types.iter().map(|t| t.decl.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_walk_skips_non_types() {
        let unit = parse("class A { @Data a: Int; @Data fn m() {} } @Data fn f() {}");
        let tagged = collect_tagged(&unit, &MarkerMatcher::new("Data"));
        assert_eq!(tagged.len(), 3);
        assert!(walk(&unit, &tagged).is_empty());
    }

    #[test]
    fn test_walk_skips_stale_paths() {
        let unit = parse("class A {}");
        let tagged = vec![TaggedElement {
            path: ElementPath::root(7),
            kind: ElementKind::Type,
            name: "Gone".into(),
            span: Span::default(),
        }];
        assert!(walk(&unit, &tagged).is_empty());
    }

    #[test]
    fn test_nested_type_only_when_tagged() {
        let unit = parse("@Data class A { a: Int; @Data class B { b: Int; } class C { c: Int; } }");
        let tagged = collect_tagged(&unit, &MarkerMatcher::new("Data"));
        let types = walk(&unit, &tagged);
        let names: Vec<_> = types.iter().map(|t| t.decl.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(field_names(&types), vec![vec!["a".to_string()], vec!["b".to_string()]]);
    }
}
